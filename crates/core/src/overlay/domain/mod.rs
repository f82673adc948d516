pub mod feature_selection;
pub mod overlay_request;
pub mod shapes;
