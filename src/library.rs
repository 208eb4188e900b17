pub mod logger;
pub mod raster;
