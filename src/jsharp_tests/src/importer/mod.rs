mod determinism_tests;
mod member_naming_tests;
mod reservation_tests;
