use layered_nn::data::make_blobs;
use layered_nn::metrics::accuracy;
use layered_nn::{FitConfig, LayeredNetwork};
use tracing_subscriber::EnvFilter;

fn main() -> layered_nn::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 200 samples, 2 features, two well-separated clusters.
    let (x, y) = make_blobs(200, 2, 0.6, 42)?;

    // Single sigmoid neuron: the default topology.
    let mut net = LayeredNetwork::default();
    let report = net.fit(
        &x,
        &y,
        FitConfig {
            epochs: 1_000,
            learning_rate: 0.1,
            eval_interval: 100,
        },
    )?;

    let acc = accuracy(&net.predict(&x)?, &y.nonzero())?;
    println!(
        "epochs_run={} stopped_early={} train_accuracy={acc}",
        report.epochs_run, report.stopped_early
    );
    println!("weights (w1, w2, bias) = {:?}", net.weights()[0].as_slice());
    println!("error history = {:?}", net.history().errors());

    Ok(())
}
