//! Simple path tracer example.
//!
//! Renders a lit sphere and writes `output.ppm` in the working directory.

use ember_renderer::{
    render, save_image, Background, Camera, CameraConfig, Color, DiffuseLight, HittableList,
    Lambertian, Material, Metal, Quad, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Ember Path Tracer - Simple Example");
    println!("==================================");

    let world = build_scene();

    let mut camera = Camera::new(CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 320,
        samples_per_pixel: 32,
        max_depth: 10,
        vfov: 30.0,
        gamma: 2.2,
        background: Background::Solid(Color::new(0.02, 0.02, 0.03)),
        look_from: Vec3::new(0.0, 1.5, 8.0),
        look_at: Vec3::new(0.0, 1.0, 0.0),
        ..Default::default()
    });

    let mut rng = StdRng::seed_from_u64(1);
    let image = render(&mut camera, &world, &mut rng)?;

    let filename = "output.ppm";
    save_image(&image, camera.config.gamma, filename)?;
    println!("Saved {}x{} to {}", image.width, image.height, filename);
    Ok(())
}

fn build_scene() -> HittableList {
    let floor: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    let chrome: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.9, 0.9, 0.9), 0.05));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(6.0, 5.5, 5.0)));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, floor.clone())));
    world.add(Arc::new(Sphere::new(Vec3::new(-1.1, 1.0, 0.0), 1.0, floor)));
    world.add(Arc::new(Sphere::new(Vec3::new(1.1, 1.0, 0.0), 1.0, chrome)));
    // Overhead panel light facing down
    world.add(Arc::new(Quad::new(
        Vec3::new(-2.0, 4.0, -2.0),
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(4.0, 0.0, 0.0),
        light,
    )));
    world
}
