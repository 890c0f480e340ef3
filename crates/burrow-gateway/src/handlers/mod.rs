mod health;
mod redirect;
mod url;

pub use health::health_handler;
pub use redirect::{redirect_handler, ClientInfo};
pub use url::{
    create_url_handler, get_url_stats_handler, method_not_allowed_handler, not_found_handler,
};

/// Package name attached to controller events.
const PACKAGE: &str = "controller";

/// Package name attached to route-level events.
const ROUTE: &str = "route";
