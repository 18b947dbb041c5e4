use layered_nn::{LinearRegression, Loss, Matrix, Model};
use tracing_subscriber::EnvFilter;

fn main() -> layered_nn::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // y = 3x - 0.5 sampled on [-1, 1], one sample per row.
    let xs: Vec<f32> = (0..21).map(|i| i as f32 / 10.0 - 1.0).collect();
    let ys: Vec<f32> = xs.iter().map(|x| 3.0 * x - 0.5).collect();
    let x = Matrix::column(&xs);
    let y = Matrix::column(&ys);

    for loss in [Loss::Mse, Loss::Mae] {
        let mut model = LinearRegression::new(loss).with_seed(7);
        model.fit(&x, &y, 2_000, 0.05)?;

        let errors = model.errors();
        println!(
            "{loss:?}: first={:.4} last={:.4} weights={:?}",
            errors[0],
            errors[errors.len() - 1],
            model.weights().map(Matrix::as_slice)
        );
    }

    Ok(())
}
