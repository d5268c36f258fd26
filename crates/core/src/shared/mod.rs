pub mod constants;
pub mod detection_box;
pub mod model_provisioner;
