mod change_filter;
mod error_handling;
mod fs_abstraction;
