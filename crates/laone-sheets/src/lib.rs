pub mod client;
pub mod error;
pub mod layout;
pub mod publish;
pub mod requests;
pub mod types;

pub use client::SheetsClient;
pub use error::SheetsError;
pub use layout::{layout_tab, TabLayout};
pub use publish::{
    plan_tabs, publish_catalog, PublishFailure, PublishOptions, PublishReport, PublishStep,
    PublishedTab,
};
