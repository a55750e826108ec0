pub mod models;
pub mod service;

pub use models::{
    BioDetails, BusinessDetails, Fees, GrowthSheet, SocialMedia, TopProfile, UserProfile,
    WeeklyPresentation,
};
pub use service::ProfileService;
