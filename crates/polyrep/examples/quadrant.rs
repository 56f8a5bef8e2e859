//! Build the quadrant below (1, 1) as a product of 1-D intervals, then query
//! dimension and point membership.
//!
//! Run with `cargo run --example quadrant`.

use nalgebra::dvector;
use polyrep::backend::dim;
use polyrep::element::HalfSpace;
use polyrep::ops::cartesian_product;
use polyrep::rep::{HRep, Representation, SplitHRep};

fn main() -> polyrep::error::Result<()> {
    let interval = SplitHRep::new(1, Vec::new(), vec![HalfSpace::new(dvector![1i64], 1)])?;
    let quadrant = cartesian_product(&interval, &interval).concrete();
    let quadrant = quadrant
        .as_split()
        .expect("product of split reps materializes split");

    println!("ambient dimension: {}", quadrant.ambient_dim());
    println!("polyhedron dimension: {}", dim(quadrant, false)?);
    for probe in [dvector![0i64, 0], dvector![1i64, 1], dvector![2i64, 0]] {
        println!(
            "({}, {}) inside: {}",
            probe[0],
            probe[1],
            quadrant.contains(&probe)?
        );
    }
    Ok(())
}
