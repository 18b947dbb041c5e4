use layered_nn::data::make_blobs;
use layered_nn::metrics::accuracy;
use layered_nn::{Error, FitConfig, LayeredNetwork, Matrix, NetworkBuilder};

fn xor() -> (Matrix, Matrix) {
    let x = Matrix::from_rows(&[vec![0.0, 0.0, 1.0, 1.0], vec![0.0, 1.0, 0.0, 1.0]]).unwrap();
    let y = Matrix::row_vector(&[0.0, 1.0, 1.0, 0.0]);
    (x, y)
}

fn cfg(epochs: usize, learning_rate: f32, eval_interval: usize) -> FitConfig {
    FitConfig {
        epochs,
        learning_rate,
        eval_interval,
    }
}

#[test]
fn single_neuron_separates_blobs() {
    let (x, y) = make_blobs(100, 2, 0.5, 3).unwrap();
    let mut net = LayeredNetwork::default();
    net.fit(&x, &y, cfg(1000, 0.1, 100)).unwrap();

    assert_eq!(net.dims(), &[3, 1]);
    let predicted = net.predict(&x).unwrap();
    let acc = accuracy(&predicted, &y.nonzero()).unwrap();
    assert!(acc >= 0.95, "training accuracy {acc}");
}

#[test]
fn predict_shape_is_outputs_by_samples() {
    let (x, y) = make_blobs(30, 3, 0.5, 1).unwrap();
    // Two one-hot outputs per sample.
    let flipped = y.map(|v| 1.0 - v);
    let two_outputs = y.merge_rows(&flipped);

    let mut net = NetworkBuilder::new().hidden_layer(5).seed(2).build();
    net.fit(&x, &two_outputs, cfg(20, 0.5, 0)).unwrap();

    assert_eq!(net.predict(&x).unwrap().shape(), (2, 30));
    assert_eq!(net.predict_proba(&x).unwrap().shape(), (2, 30));
}

#[test]
fn identical_setup_gives_bit_identical_weights() {
    let (x, y) = make_blobs(40, 4, 0.8, 5).unwrap();
    let train = |seed| {
        let mut net = LayeredNetwork::with_seed(&[4, 3], seed);
        net.fit(&x, &y, cfg(200, 0.3, 50)).unwrap();
        net
    };

    let a = train(11);
    let b = train(11);
    assert_eq!(a.weights(), b.weights());
    assert_eq!(a.history(), b.history());

    let c = train(12);
    assert_ne!(a.weights(), c.weights());
}

#[test]
fn history_has_one_entry_per_checkpoint_without_early_stop() {
    // A single neuron can never classify all of XOR.
    let (x, y) = xor();
    let mut net = LayeredNetwork::default();
    let report = net.fit(&x, &y, cfg(250, 0.1, 100)).unwrap();

    assert!(!report.stopped_early);
    assert_eq!(report.epochs_run, 250);
    // Checkpoints after epochs 0, 100 and 200: ceil(250 / 100).
    assert_eq!(net.history().len(), 3);
    assert!(net.history().errors().iter().all(|&e| e > 0.0));
    assert_eq!(report.final_error, net.history().last());
}

#[test]
fn perfect_accuracy_stops_training() {
    let (x, y) = make_blobs(60, 2, 0.3, 8).unwrap();
    let mut net = LayeredNetwork::default();
    let report = net.fit(&x, &y, cfg(5000, 0.5, 10)).unwrap();

    assert!(report.stopped_early);
    assert_eq!(net.history().last(), Some(0.0));
    assert_eq!(report.epochs_run % 10, 1);
    assert_eq!(net.history().len(), (report.epochs_run - 1) / 10 + 1);
    // Every earlier checkpoint was below 100%.
    let errors = net.history().errors();
    assert!(errors[..errors.len() - 1].iter().all(|&e| e > 0.0));
}

#[test]
fn zero_eval_interval_records_nothing() {
    let (x, y) = xor();
    let mut net = LayeredNetwork::new(&[3]);
    let report = net.fit(&x, &y, cfg(50, 0.1, 0)).unwrap();

    assert_eq!(report.epochs_run, 50);
    assert_eq!(report.final_error, None);
    assert!(net.history().is_empty());
}

#[test]
fn history_accumulates_across_fits() {
    let (x, y) = xor();
    let mut net = LayeredNetwork::default();
    net.fit(&x, &y, cfg(100, 0.1, 50)).unwrap();
    net.fit(&x, &y, cfg(100, 0.1, 50)).unwrap();
    assert_eq!(net.history().len(), 4);

    net.reset();
    assert!(net.history().is_empty());
    assert!(matches!(net.predict(&x), Err(Error::IllegalState(_))));
}

#[test]
fn explicit_initialize_allows_prediction_before_fit() {
    let (x, _) = xor();
    let mut net = LayeredNetwork::new(&[2]);
    net.initialize(2, 1).unwrap();

    let proba = net.predict_proba(&x).unwrap();
    assert!(proba.as_slice().iter().all(|&p| p > 0.0 && p < 1.0));
    assert!(net.initialize(0, 1).is_err());
}

#[test]
fn invalid_topology_still_trains_default_network() {
    let (x, y) = xor();
    let mut net = LayeredNetwork::new(&[0]);
    assert!(!net.is_topology_valid());

    net.fit(&x, &y, cfg(10, 0.1, 0)).unwrap();
    assert_eq!(net.dims(), &[3, 1]);
}

#[test]
fn shape_errors_are_invalid_argument() {
    let (x, y) = xor();
    let mut net = LayeredNetwork::default();

    let empty = Matrix::zeros(2, 0);
    assert!(matches!(
        net.fit(&empty, &Matrix::zeros(1, 0), cfg(10, 0.1, 0)),
        Err(Error::InvalidArgument(_))
    ));

    let three_labels = Matrix::row_vector(&[0.0, 1.0, 1.0]);
    assert!(matches!(
        net.fit(&x, &three_labels, cfg(10, 0.1, 0)),
        Err(Error::InvalidArgument(_))
    ));

    assert!(matches!(
        net.fit(&x, &y, cfg(10, 0.0, 0)),
        Err(Error::InvalidArgument(_))
    ));
}
