//! Built-in scenes.
//!
//! Each preset returns its geometry together with the camera it was framed
//! for. Materials are shared between primitives through `Arc`.

use crate::cli::ScenePreset;
use ember_renderer::{
    Background, CameraConfig, Color, Dielectric, DiffuseLight, HittableList, Lambertian,
    Material, Metal, PixelSampling, Quad, Sphere, Vec3,
};
use std::sync::Arc;

/// Build the world and camera for a preset.
pub fn build(preset: ScenePreset) -> (HittableList, CameraConfig) {
    match preset {
        ScenePreset::Spheres => (spheres(), spheres_camera()),
        ScenePreset::Defocus => (spheres(), defocus_camera()),
        ScenePreset::Lights => lights(),
        ScenePreset::Cornell => cornell(),
    }
}

fn spheres() -> HittableList {
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let bubble: Arc<dyn Material> = Arc::new(Dielectric::new(1.0 / 1.5));
    let metal: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -1.2), 0.5, center)));
    world.add(Arc::new(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass)));
    // Air pocket inside the glass sphere makes it read as hollow
    world.add(Arc::new(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.4, bubble)));
    world.add(Arc::new(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, metal)));
    world
}

fn spheres_camera() -> CameraConfig {
    CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 90.0,
        gamma: 2.2,
        background: Background::SkyGradient,
        look_from: Vec3::ZERO,
        look_at: Vec3::new(0.0, 0.0, -1.0),
        vup: Vec3::Y,
        ..Default::default()
    }
}

fn defocus_camera() -> CameraConfig {
    CameraConfig {
        vfov: 20.0,
        defocus_angle: 10.0,
        focus_dist: Some(3.4),
        look_from: Vec3::new(-2.0, 2.0, 1.0),
        look_at: Vec3::new(0.0, 0.0, -1.0),
        ..spheres_camera()
    }
}

fn lights() -> (HittableList, CameraConfig) {
    let diffuse: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(4.0, 4.0, 4.0)));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, diffuse.clone())));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, diffuse)));
    world.add(Arc::new(Quad::new(
        Vec3::new(3.0, 1.0, -2.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        light,
    )));

    let camera = CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 20.0,
        gamma: 2.2,
        background: Background::Solid(Color::ZERO),
        look_from: Vec3::new(26.0, 3.0, 6.0),
        look_at: Vec3::new(0.0, 2.0, 0.0),
        vup: Vec3::Y,
        ..Default::default()
    };
    (world, camera)
}

fn cornell() -> (HittableList, CameraConfig) {
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(15.0, 15.0, 15.0)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));

    let quad = |q: Vec3, u: Vec3, v: Vec3, material: &Arc<dyn Material>| {
        Arc::new(Quad::new(q, u, v, material.clone()))
    };

    let mut world = HittableList::new();
    world.add(quad(Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 555.0, 0.0), Vec3::new(0.0, 0.0, 555.0), &green));
    world.add(quad(Vec3::ZERO, Vec3::new(0.0, 555.0, 0.0), Vec3::new(0.0, 0.0, 555.0), &red));
    world.add(quad(Vec3::new(343.0, 554.0, 332.0), Vec3::new(-130.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -105.0), &light));
    world.add(quad(Vec3::ZERO, Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 555.0), &white));
    world.add(quad(Vec3::new(555.0, 555.0, 555.0), Vec3::new(-555.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -555.0), &white));
    world.add(quad(Vec3::new(0.0, 0.0, 555.0), Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 555.0, 0.0), &white));

    world.add(Arc::new(Sphere::new(Vec3::new(190.0, 90.0, 190.0), 90.0, glass)));
    world.add(Arc::new(Sphere::new(Vec3::new(370.0, 120.0, 370.0), 120.0, white)));

    let camera = CameraConfig {
        aspect_ratio: 1.0,
        image_width: 300,
        samples_per_pixel: 64,
        max_depth: 50,
        vfov: 40.0,
        gamma: 2.2,
        background: Background::Solid(Color::ZERO),
        look_from: Vec3::new(278.0, 278.0, -800.0),
        look_at: Vec3::new(278.0, 278.0, 0.0),
        vup: Vec3::Y,
        sampling: PixelSampling::Stratified,
        ..Default::default()
    };
    (world, camera)
}
