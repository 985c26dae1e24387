pub mod analytics_controller;
pub mod feedback_controller;
pub mod review_controller;
pub mod subject_controller;
