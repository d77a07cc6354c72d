//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Anti-aliasing via uniform or stratified multi-sampling
//! - Flat or sky-gradient backgrounds

use crate::camera::{Background, PixelSampling};
use crate::{color_to_rgb8, Camera, Color, Hittable, Ray};
use ember_math::Interval;
use rand::RngCore;
use std::time::Instant;
use thiserror::Error;

/// Lower bound on accepted hit distances; suppresses self-intersection
/// ("shadow acne") at the surface a ray leaves from.
pub const T_MIN: f32 = 0.001;

/// Largest image, in pixels, the renderer will allocate.
pub const MAX_PIXELS: usize = 1 << 28;

/// Errors that can occur before any pixel is traced.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("image of {width}x{height} pixels exceeds the pixel limit")]
    ImageTooLarge { width: u32, height: u32 },
}

/// Number of pixels in a `width` x `height` image, or `None` if it is
/// larger than [`MAX_PIXELS`].
pub fn pixel_count(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&count| count <= MAX_PIXELS)
}

/// Compute the radiance arriving along a ray.
///
/// Returns black once `depth` reaches zero; otherwise emission at the hit
/// plus the attenuated radiance along the scattered ray.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: &Background,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return match background {
            Background::Solid(color) => *color,
            Background::SkyGradient => sky_gradient(ray),
        };
    };

    // Emission is taken before recursing, and added even if the surface scatters
    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, world, depth - 1, background, rng);
            emission + result.attenuation * scattered_color
        }
        None => emission,
    }
}

/// Compute sky gradient background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling.
///
/// The camera must be initialized.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let config = &camera.config;
    let mut pixel_color = Color::ZERO;

    match config.sampling {
        PixelSampling::Uniform => {
            for _ in 0..camera.sample_count() {
                let ray = camera.get_ray(x, y, rng);
                pixel_color += ray_color(&ray, world, config.max_depth, &config.background, rng);
            }
        }
        PixelSampling::Stratified => {
            let n = camera.sqrt_spp();
            for s_j in 0..n {
                for s_i in 0..n {
                    let ray = camera.get_ray_stratified(x, y, s_i, s_j, rng);
                    pixel_color +=
                        ray_color(&ray, world, config.max_depth, &config.background, rng);
                }
            }
        }
    }

    // Average the samples
    pixel_color * camera.samples_scale()
}

/// Linear radiance per pixel, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let count = pixel_count(width, height).ok_or(RenderError::ImageTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            pixels: vec![Color::ZERO; count],
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Gamma-encode and quantize to packed RGB bytes.
    pub fn to_rgb8(&self, gamma: f32) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color, gamma));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer.
pub fn render(
    camera: &mut Camera,
    world: &dyn Hittable,
    rng: &mut dyn RngCore,
) -> Result<ImageBuffer, RenderError> {
    render_with_progress(camera, world, rng, |_| {})
}

/// Render the entire scene, reporting the number of scanlines remaining
/// before each row is started.
///
/// Single-threaded; pixels are visited row by row from the top left.
pub fn render_with_progress<F>(
    camera: &mut Camera,
    world: &dyn Hittable,
    rng: &mut dyn RngCore,
    mut on_scanline: F,
) -> Result<ImageBuffer, RenderError>
where
    F: FnMut(u32),
{
    camera.initialize();

    let width = camera.image_width();
    let height = camera.image_height();
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        camera.sample_count(),
        camera.config.max_depth
    );

    let mut image = ImageBuffer::new(width, height)?;
    let start = Instant::now();

    for y in 0..height {
        on_scanline(height - y);
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, rng);
            image.set(x, y, color);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CameraConfig, DiffuseLight, HitRecord, HittableList, Lambertian, Material, Quad,
        ScatterResult, Sphere, Vec3,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    /// Emits light and also reflects straight back along the normal.
    struct GlowingMirror {
        emit: Color,
        albedo: Color,
    }

    impl Material for GlowingMirror {
        fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, rec.normal),
            })
        }

        fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
            self.emit
        }
    }

    /// Sphere at the origin lit by an emissive quad behind the camera.
    fn lit_sphere_scene() -> HittableList {
        let diffuse: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.7, 0.7, 0.7)));
        let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(8.0, 8.0, 8.0)));

        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(Vec3::ZERO, 1.0, diffuse)));
        // Large light at z = 6 facing the sphere; the camera sits in front of it
        world.add(Arc::new(Quad::new(
            Vec3::new(-5.0, -5.0, 6.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
            light,
        )));
        world
    }

    fn lit_sphere_camera(max_depth: u32) -> Camera {
        Camera::new(CameraConfig {
            image_width: 21,
            samples_per_pixel: 8,
            max_depth,
            vfov: 60.0,
            look_from: Vec3::new(0.0, 0.0, 4.0),
            look_at: Vec3::ZERO,
            ..Default::default()
        })
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)));
        let down = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0)));

        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
        assert!((down - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_miss_returns_background() {
        let world = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0));
        let mut rng = StdRng::seed_from_u64(1);

        let solid = Background::Solid(Color::new(0.2, 0.3, 0.4));
        assert_eq!(ray_color(&ray, &world, 5, &solid, &mut rng), Color::new(0.2, 0.3, 0.4));

        let sky = ray_color(&ray, &world, 5, &Background::SkyGradient, &mut rng);
        assert!((sky - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_zero_depth_is_black() {
        let world = lit_sphere_scene();
        let mut camera = lit_sphere_camera(0).with_background(Background::SkyGradient);
        let mut rng = StdRng::seed_from_u64(2);

        let image = render(&mut camera, &world, &mut rng).expect("small image");
        assert!(image.pixels.iter().all(|c| *c == Color::ZERO));
    }

    #[test]
    fn test_emission_without_scatter() {
        let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(2.0, 1.0, 0.5)));
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, light)));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rng = StdRng::seed_from_u64(3);
        let color = ray_color(&ray, &world, 1, &Background::SkyGradient, &mut rng);
        assert_eq!(color, Color::new(2.0, 1.0, 0.5));
    }

    #[test]
    fn test_emission_added_when_surface_scatters() {
        let glow: Arc<dyn Material> = Arc::new(GlowingMirror {
            emit: Color::ONE,
            albedo: Color::splat(0.5),
        });
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, glow)));

        // Bounces off the near pole back into the background
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let background = Background::Solid(Color::splat(0.2));
        let mut rng = StdRng::seed_from_u64(8);

        let color = ray_color(&ray, &world, 2, &background, &mut rng);
        assert!((color - Color::splat(1.1)).length() < 1e-6, "color = {:?}", color);

        // Out of depth after the hit: emission alone survives
        let color = ray_color(&ray, &world, 1, &background, &mut rng);
        assert!((color - Color::ONE).length() < 1e-6, "color = {:?}", color);
    }

    #[test]
    fn test_attenuation_composes_with_background() {
        // Head-on mirror bounces straight back into a flat background
        let mirror: Arc<dyn Material> = Arc::new(crate::Metal::new(Color::new(0.5, 0.25, 1.0), 0.0));
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, mirror)));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let background = Background::Solid(Color::new(0.8, 0.8, 0.8));
        let mut rng = StdRng::seed_from_u64(4);

        let color = ray_color(&ray, &world, 2, &background, &mut rng);
        assert!((color - Color::new(0.4, 0.2, 0.8)).length() < 1e-6);

        // One bounce short: the reflected ray is cut off
        let color = ray_color(&ray, &world, 1, &background, &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_lit_sphere_end_to_end() {
        let world = lit_sphere_scene();
        let mut camera = lit_sphere_camera(4);
        let mut rng = StdRng::seed_from_u64(5);

        let image = render(&mut camera, &world, &mut rng).expect("small image");
        assert_eq!((image.width, image.height), (21, 21));

        // Centre pixel sees the sphere, lit from the front
        let centre = image.get(10, 10);
        assert!(centre.length() > 0.0, "centre = {:?}", centre);

        // Corner rays miss the sphere and leave through the black background
        assert_eq!(image.get(0, 0), Color::ZERO);
        assert_eq!(image.get(20, 20), Color::ZERO);
    }

    #[test]
    fn test_unlit_scene_is_black() {
        let diffuse: Arc<dyn Material> = Arc::new(Lambertian::new(Color::ONE));
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(Vec3::ZERO, 1.0, diffuse)));

        let mut camera = lit_sphere_camera(10).with_sampling(PixelSampling::Stratified);
        let mut rng = StdRng::seed_from_u64(6);

        let image = render(&mut camera, &world, &mut rng).expect("small image");
        assert!(image.pixels.iter().all(|c| *c == Color::ZERO));
    }

    #[test]
    fn test_progress_counts_down() {
        let world = HittableList::new();
        let mut camera = Camera::new(CameraConfig {
            image_width: 4,
            aspect_ratio: 2.0,
            samples_per_pixel: 1,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(7);

        let mut remaining = Vec::new();
        let image = render_with_progress(&mut camera, &world, &mut rng, |r| remaining.push(r))
            .expect("small image");
        assert_eq!(image.height, 2);
        assert_eq!(remaining, vec![2, 1]);
    }

    #[test]
    fn test_image_buffer() {
        let mut image = ImageBuffer::new(2, 1).expect("small image");
        image.set(1, 0, Color::new(1.0, 0.5, 0.0));

        assert_eq!(image.get(0, 0), Color::ZERO);
        assert_eq!(image.to_rgb8(1.0), vec![0, 0, 0, 255, 127, 0]);
    }

    #[test]
    fn test_pixel_count_limits() {
        assert_eq!(pixel_count(400, 225), Some(90_000));
        assert_eq!(pixel_count(4, u32::MAX), None);
        assert_eq!(pixel_count(u32::MAX, u32::MAX), None);
        assert!(matches!(
            ImageBuffer::new(4, u32::MAX),
            Err(RenderError::ImageTooLarge { width: 4, height: u32::MAX })
        ));
    }

    #[test]
    fn test_extreme_aspect_ratio_is_rejected() {
        // Height saturates instead of wrapping
        let mut camera = Camera::new(CameraConfig {
            image_width: 4,
            aspect_ratio: 1e-12,
            samples_per_pixel: 1,
            ..Default::default()
        });
        assert_eq!(camera.image_height(), u32::MAX);
        assert_eq!(camera.pixel_count(), None);

        let world = HittableList::new();
        let mut rng = StdRng::seed_from_u64(9);
        let mut rows = 0;
        let result = render_with_progress(&mut camera, &world, &mut rng, |_| rows += 1);
        assert!(matches!(result, Err(RenderError::ImageTooLarge { .. })));
        assert_eq!(rows, 0);
    }

    #[test]
    fn test_sampling_follows_initialized_state() {
        let world = HittableList::new();
        let mut camera = Camera::new(CameraConfig {
            image_width: 1,
            samples_per_pixel: 4,
            background: Background::Solid(Color::splat(0.5)),
            ..Default::default()
        });
        // Edited after initialize; the cached sample count still drives the loop
        camera.config.samples_per_pixel = 1;
        let mut rng = StdRng::seed_from_u64(10);

        let color = render_pixel(&camera, &world, 0, 0, &mut rng);
        assert!((color - Color::splat(0.5)).length() < 1e-6, "color = {:?}", color);
    }
}
