/// Marks a placeholder in templates and file name patterns: `$key`.
pub const PLACEHOLDER_PREFIX: char = '$';

pub const DEFAULT_PROGRAM: &str = "kubectl";
pub const CREATE_ARGS: [&str; 2] = ["create", "-f"];
