use layered_nn::data::make_blobs;
use layered_nn::metrics::accuracy;
use layered_nn::{Model, Perceptron};
use tracing_subscriber::EnvFilter;

fn main() -> layered_nn::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // The generators are column-per-sample; the perceptron wants rows and
    // -1/+1 labels.
    let (x, y) = make_blobs(100, 3, 0.8, 5)?;
    let x = x.transpose();
    let y = y.transpose().map(|v| 2.0 * v - 1.0);

    let mut p = Perceptron::new().with_seed(3);
    p.fit(&x, &y, 200, 0.01)?;

    let converged_at = p.errors().iter().position(|&e| e == 0.0);
    // accuracy() wants one sample per column.
    let predicted = p.predict(&x)?.to_matrix().transpose().nonzero();
    let truth = y.gt(0.0).to_matrix().transpose().nonzero();
    let acc = accuracy(&predicted, &truth)?;
    println!("first error-free epoch: {converged_at:?}, accuracy={acc}");

    Ok(())
}
