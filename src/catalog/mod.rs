pub mod rays;
