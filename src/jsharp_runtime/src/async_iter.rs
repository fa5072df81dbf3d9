use crate::emitter::RuntimeCallEmitter;
use jsharp_script::Expr;

impl<'a> RuntimeCallEmitter<'a> {
    // ----- iterator blocks -----

    /// The enumerator object backing an iterator block.
    pub fn make_enumerator(
        &self,
        move_next: Expr,
        get_current: Expr,
        dispose: Option<Expr>,
        this_object: Option<Expr>,
    ) -> Expr {
        Expr::new_object(
            Expr::type_ref(self.store.core.iterator_enumerator),
            vec![
                move_next,
                get_current,
                dispose.unwrap_or(Expr::Null),
                this_object.unwrap_or(Expr::Null),
            ],
        )
    }

    /// The enumerable wrapper over an iterator block; `get_enumerator` is a
    /// function expression producing a fresh enumerator per call.
    pub fn make_enumerable(&self, get_enumerator: Expr) -> Expr {
        Expr::new_object(
            Expr::type_ref(self.store.core.iterator_enumerable),
            vec![get_enumerator],
        )
    }

    // ----- asynchronous completion primitives -----

    pub fn create_task_completion_source(&self) -> Expr {
        Expr::new_object(
            Expr::type_ref(self.store.core.task_completion_source),
            vec![],
        )
    }

    pub fn set_async_result(&self, completion_source: Expr, value: Option<Expr>) -> Expr {
        Expr::invoke(
            Expr::member(completion_source, "setResult"),
            vec![value.unwrap_or(Expr::Null)],
        )
    }

    /// Failures wrap the raw script exception before completing the task.
    pub fn set_async_exception(&self, completion_source: Expr, exception: Expr) -> Expr {
        let wrapped = Expr::invoke(
            Expr::member(Expr::type_ref(self.store.core.exception), "wrap"),
            vec![exception],
        );
        Expr::invoke(
            Expr::member(completion_source, "setException"),
            vec![wrapped],
        )
    }

    pub fn get_task_from_completion_source(&self, completion_source: Expr) -> Expr {
        Expr::member(completion_source, "task")
    }
}
