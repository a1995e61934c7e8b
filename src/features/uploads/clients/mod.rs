mod classifier_client;

pub use classifier_client::{Classification, HttpRoadClassifier, RoadClassifier};
