//! User interface module - terminal output for release plans.

pub mod formatter;

pub use formatter::{
    describe_branch, display_boundary_warning, display_branches, display_error, display_plan,
    display_release_error, display_status, display_success,
};
