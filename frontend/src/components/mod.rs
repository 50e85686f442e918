// Reusable components live here.

pub mod article_body;
pub mod article_list;
pub mod loading_spinner;
pub mod raw_html;
pub mod toolbar;
