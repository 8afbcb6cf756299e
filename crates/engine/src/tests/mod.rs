mod helpers;
mod run_tests;
