pub mod github_icons;
pub mod switcheo;
pub mod util;
