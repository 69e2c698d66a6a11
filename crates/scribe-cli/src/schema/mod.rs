pub mod feature_model;
