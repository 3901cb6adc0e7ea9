//! Domain entities - core business objects

mod config;
mod member;
mod progression;
mod role;
mod role_menu;

pub use config::{
    render_welcome, CommunityConfig, ConfigUpdate, DEFAULT_WELCOME_TEMPLATE, MAX_TEMPLATE_LENGTH,
};
pub use member::MemberSnapshot;
pub use progression::{xp_threshold, MemberProgression};
pub use role::{BotPrivilege, CommunityInfo, RoleInfo};
pub use role_menu::{RoleMenu, CUSTOM_ID_PREFIX, MAX_CUSTOM_ID_LENGTH, MAX_MENU_ROLES};
