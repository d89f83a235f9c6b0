pub mod images_service;
pub mod images_store;


pub use images_service::{
    ImageReconcileReport, ImageService, ImageServiceTrait, ALLOWED_IMAGE_EXTENSIONS,
};
pub use images_store::{FsImageStore, ImageStoreTrait};
