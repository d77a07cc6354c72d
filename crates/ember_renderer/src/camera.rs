//! Camera for ray generation.

use crate::sampling::{random_in_unit_disk, sample_square, sample_square_stratified};
use crate::{Color, Ray};
use ember_math::Vec3;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// What a ray sees when it leaves the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// A flat color in every direction.
    Solid(Color),
    /// White at the horizon blending to sky blue overhead.
    SkyGradient,
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::ZERO)
    }
}

/// How sub-pixel sample positions are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelSampling {
    /// Every sample jittered independently over the whole pixel.
    #[default]
    Uniform,
    /// A sqrt(spp) x sqrt(spp) grid, jittered within each cell.
    Stratified,
}

/// Camera options. Every field has a usable default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Width over height
    pub aspect_ratio: f32,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Display gamma applied on output
    pub gamma: f32,
    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f32,
    /// Distance to the plane of perfect focus; `None` focuses on `look_at`
    pub focus_dist: Option<f32>,
    pub background: Background,
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
    pub sampling: PixelSampling,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            gamma: 1.0,
            defocus_angle: 0.0,
            focus_dist: None,
            background: Background::default(),
            look_from: Vec3::new(0.0, 0.0, -1.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            sampling: PixelSampling::default(),
        }
    }
}

/// Camera for generating rays into the scene.
///
/// Derived state is cached by [`Camera::initialize`], which the renderer
/// calls once per render. `look_from` and `look_at` must differ.
#[derive(Debug, Clone)]
pub struct Camera {
    pub config: CameraConfig,

    // Cached computed values (set by initialize())
    image_height: u32,
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
    defocus: bool,
    sqrt_spp: u32,
    sample_count: u32,
    samples_scale: f32,
}

impl Camera {
    /// Create an initialized camera from the given options.
    pub fn new(config: CameraConfig) -> Self {
        let mut camera = Self {
            config,
            image_height: 1,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
            defocus: false,
            sqrt_spp: 1,
            sample_count: 1,
            samples_scale: 1.0,
        };
        camera.initialize();
        camera
    }

    /// Set image width and aspect ratio.
    pub fn with_resolution(mut self, width: u32, aspect_ratio: f32) -> Self {
        self.config.image_width = width;
        self.config.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.config.samples_per_pixel = samples;
        self.config.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.config.look_from = look_from;
        self.config.look_at = look_at;
        self.config.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: Option<f32>) -> Self {
        self.config.vfov = vfov;
        self.config.defocus_angle = defocus_angle;
        self.config.focus_dist = focus_dist;
        self
    }

    /// Set background.
    pub fn with_background(mut self, background: Background) -> Self {
        self.config.background = background;
        self
    }

    /// Set output gamma.
    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.config.gamma = gamma;
        self
    }

    /// Set pixel sampling pattern.
    pub fn with_sampling(mut self, sampling: PixelSampling) -> Self {
        self.config.sampling = sampling;
        self
    }

    /// Recompute derived state from `config`.
    pub fn initialize(&mut self) {
        let cfg = &self.config;

        let image_width = cfg.image_width.max(1);
        self.image_height = ((image_width as f32 / cfg.aspect_ratio) as u32).max(1);

        let samples = cfg.samples_per_pixel.max(1);
        self.sqrt_spp = ((samples as f64).sqrt() as u32).max(1);
        self.sample_count = match cfg.sampling {
            PixelSampling::Uniform => samples,
            PixelSampling::Stratified => self.sqrt_spp * self.sqrt_spp,
        };
        self.samples_scale = 1.0 / self.sample_count as f32;

        self.center = cfg.look_from;
        let focus_dist = cfg
            .focus_dist
            .unwrap_or_else(|| (cfg.look_from - cfg.look_at).length());

        // Calculate viewport dimensions
        let theta = cfg.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * focus_dist;
        let viewport_width = viewport_height * (image_width as f32 / self.image_height as f32);

        // Calculate camera basis vectors
        self.w = (cfg.look_from - cfg.look_at).normalize();
        self.u = cfg.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Viewport edges; v runs down the image
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        self.pixel_delta_u = viewport_u / image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        self.defocus = cfg.defocus_angle > 0.0;
        let defocus_radius = focus_dist * (cfg.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        log::debug!(
            "camera initialized: {}x{}, focus_dist={}, defocus_radius={}, samples={}",
            image_width,
            self.image_height,
            focus_dist,
            defocus_radius,
            self.sample_count
        );
    }

    pub fn image_width(&self) -> u32 {
        self.config.image_width.max(1)
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Pixels in the output image, or `None` if it is too large to render.
    pub fn pixel_count(&self) -> Option<usize> {
        crate::renderer::pixel_count(self.image_width(), self.image_height)
    }

    /// Side of the stratified sample grid.
    pub fn sqrt_spp(&self) -> u32 {
        self.sqrt_spp
    }

    /// Samples taken per pixel.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Get the samples scale factor (1 / samples actually taken per pixel).
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }

    /// Generate a ray for pixel (i, j) jittered anywhere within the pixel.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);
        self.ray_through(i, j, offset, rng)
    }

    /// Generate a ray for pixel (i, j) jittered within stratum (s_i, s_j).
    pub fn get_ray_stratified(
        &self,
        i: u32,
        j: u32,
        s_i: u32,
        s_j: u32,
        rng: &mut dyn RngCore,
    ) -> Ray {
        let offset = sample_square_stratified(rng, s_i, s_j, self.sqrt_spp);
        self.ray_through(i, j, offset, rng)
    }

    fn ray_through(&self, i: u32, j: u32, offset: Vec3, rng: &mut dyn RngCore) -> Ray {
        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus {
            self.defocus_disk_sample(rng)
        } else {
            self.center
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}
