//! Build-info augmentation of the plugin output.

use crate::types::BuildInfo;

/// Append the server's build information to a finalized output text.
///
/// Fields are rendered as-is, so an empty field leaves only its label.
pub fn augment(output: String, info: &BuildInfo) -> String {
    let mut text = output;
    text.reserve(128);

    text.push_str("\n\n");
    text.push_str("Version: ");
    text.push_str(&info.version);
    text.push_str("\nBranch: ");
    text.push_str(&info.branch);
    text.push_str("\nBuildDate: ");
    text.push_str(&info.build_date);
    text.push_str("\nBuildUser: ");
    text.push_str(&info.build_user);
    text.push_str("\nRevision: ");
    text.push_str(&info.revision);

    text
}
