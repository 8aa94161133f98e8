mod auth;
mod dashboard;
mod landing;
mod not_found;

pub use auth::AuthPage;
pub use dashboard::DashboardPage;
pub use landing::LandingPage;
pub use not_found::NotFoundPage;
