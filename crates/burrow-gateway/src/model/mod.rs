mod url;

pub use url::{
    ClickStat, CreateUrlRequest, CreateUrlResponse, ErrorResponse, HealthResponse,
    UrlStatsResponse,
};
