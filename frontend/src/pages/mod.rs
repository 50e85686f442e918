pub mod about;
pub mod article;
pub mod home;

pub use about::AboutPage;
pub use article::ArticlePage;
pub use home::HomePage;
