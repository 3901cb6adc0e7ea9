//! Text the engine posts back to the community

/// Reply to an interaction the engine could not complete
pub const INTERACTION_FAILURE: &str = "Something went wrong while handling that. Please try again later.";

/// Reply to a role-menu selection that was applied
pub const ROLES_UPDATED: &str = "Your roles have been updated.";

pub fn level_up(member_mention: &str, level: u32) -> String {
    format!("\u{1f389} {member_mention} reached level {level}!")
}

/// Public warning after an invite link was removed
pub fn automod_warning(member_mention: &str) -> String {
    format!("{member_mention}, new members can't post invite links yet.")
}

pub fn automod_audit(member_mention: &str, channel_mention: &str) -> String {
    format!("\u{1f6e1}\u{fe0f} Removed an invite link from {member_mention} in {channel_mention}.")
}

pub fn join_audit(member_mention: &str) -> String {
    format!("\u{1f4e5} {member_mention} joined.")
}
