//! Ember Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for physically-based rendering of small,
//! programmatically assembled scenes.

mod camera;
mod color;
mod hittable;
mod material;
mod output;
mod quad;
mod renderer;
mod sampling;
mod sphere;

pub use camera::{Background, Camera, CameraConfig, PixelSampling};
pub use color::{color_to_rgb8, gamma_to_linear, linear_to_gamma};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterResult};
pub use output::{save_image, write_ppm, OutputError};
pub use quad::Quad;
pub use renderer::{
    pixel_count, ray_color, render, render_pixel, render_with_progress, sky_gradient, ImageBuffer,
    RenderError, MAX_PIXELS, T_MIN,
};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Interval, Ray, Vec3, Vec3Ext};
