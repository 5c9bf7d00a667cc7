/*
 * Fixed user-visible strings owned by the browse logic rather than the
 * shell. Kept in one place so tests can assert against them.
 */

/// Title shown for the root folder, regardless of the name the server
/// returns for it.
pub const ALL_FILES_LABEL: &str = "All Files";
