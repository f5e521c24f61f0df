//! End-to-end tests for training and generating chord progressions.

use chordchain::backoff::BackoffFloor;
use chordchain::builder::{build, ModelBuilder};
use chordchain::config::EngineConfig;
use chordchain::generator::{generate, GenerateError, Generator, SeedResolution, StepOrigin};
use chordchain::{PitchSet, TransitionModel};
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::thread;

fn first_choice() -> StepRng {
    StepRng::new(0, 0)
}

fn major(root: u8) -> PitchSet {
    PitchSet::new([root, root + 4, root + 7])
}

fn minor(root: u8) -> PitchSet {
    PitchSet::new([root, root + 3, root + 7])
}

#[test]
fn learns_and_replays_the_reference_progression() {
    let corpus = ["A", "B", "C", "B", "C", "D", "A", "B", "C"];
    let model = build(&corpus, 2).unwrap();

    assert_eq!(model.observations(&["A", "B"]), Some(&["C", "C"][..]));
    assert_eq!(model.observations(&["B", "C"]), Some(&["B", "D"][..]));

    let generation = generate(&model, Some(&["A", "B"][..]), 5, &mut first_choice()).unwrap();
    assert_eq!(generation.sequence(), &["A", "B", "C", "B", "C"]);
    assert_eq!(generation.seed_resolution(), SeedResolution::Exact);
}

#[test]
fn too_short_corpus_cannot_generate() {
    let model = build(&["A", "B"], 3).unwrap();
    assert!(model.is_empty());

    let result = generate(&model, None, 8, &mut first_choice());
    assert_eq!(result.unwrap_err(), GenerateError::EmptyModel);
}

#[test]
fn sampling_frequency_follows_observations() {
    let model = ModelBuilder::new()
        .order(2)
        .sequence(["A", "B", "X"])
        .sequence(["A", "B", "X"])
        .sequence(["A", "B", "X"])
        .sequence(["A", "B", "Y"])
        .build()
        .unwrap();
    assert_eq!(model.observations(&["A", "B"]), Some(&["X", "X", "X", "Y"][..]));

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let trials = 10_000;
    let mut x = 0;
    for _ in 0..trials {
        let generation = generate(&model, Some(&["A", "B"][..]), 3, &mut rng).unwrap();
        match generation.sequence()[2] {
            "X" => x += 1,
            "Y" => {}
            other => panic!("unexpected successor {other}"),
        }
    }

    let share = x as f64 / trials as f64;
    assert!((share - 0.75).abs() < 0.03, "X share was {share}");
}

#[test]
fn same_seed_same_progression() {
    let progression = vec![
        major(0),
        minor(9),
        major(5),
        major(7),
        major(0),
        minor(2),
        major(7),
        major(0),
    ];
    let model = build(&progression, 2).unwrap();

    let mut rng_a = ChaCha8Rng::seed_from_u64(5);
    let mut rng_b = ChaCha8Rng::seed_from_u64(5);
    let a = generate(&model, None, 16, &mut rng_a).unwrap();
    let b = generate(&model, None, 16, &mut rng_b).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.seed_resolution(), SeedResolution::Random);
}

#[test]
fn single_chord_seed_finds_an_opening() {
    let progression = vec![major(0), major(5), major(7), major(0), minor(9), major(5)];
    let model = build(&progression, 2).unwrap();

    let generation = generate(&model, Some(&[major(7)][..]), 4, &mut first_choice()).unwrap();

    // The opening ends in the seed chord: (F, G).
    assert_eq!(generation.seed_resolution(), SeedResolution::SuffixMatch);
    assert_eq!(&generation.sequence()[..2], &[major(5), major(7)]);
    assert_eq!(generation.sequence()[2], major(0));
}

#[test]
fn generated_chords_map_to_midi_notes() {
    let progression = vec![major(0), major(5), major(7), major(0)];
    let model = build(&progression, 1).unwrap();
    let generation = Generator::new(4)
        .seed([major(0)])
        .generate(&model, &mut first_choice())
        .unwrap();

    let voiced: Vec<Vec<u8>> = generation
        .sequence()
        .iter()
        .map(|chord| chord.to_midi_notes(60))
        .collect();

    // F major folds to {0, 5, 9} relative to C.
    assert_eq!(voiced[0], vec![60, 64, 67]);
    assert_eq!(voiced[1], vec![60, 65, 69]);
    assert_eq!(voiced.len(), 4);
}

#[test]
fn shared_model_generates_independently_per_thread() {
    let corpus: Vec<u16> = (0..200).map(|i| (i * i + 3 * i) % 11).collect();
    let model = Arc::new(build(&corpus, 3).unwrap());

    let expected: Vec<Vec<u16>> = (0..4u64)
        .map(|seed| {
            Generator::new(64)
                .floor(BackoffFloor::AnySymbol)
                .generate_seeded(&*model, seed)
                .unwrap()
                .into_sequence()
        })
        .collect();

    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let model = Arc::clone(&model);
            thread::spawn(move || {
                Generator::new(64)
                    .floor(BackoffFloor::AnySymbol)
                    .generate_seeded(&*model, seed)
                    .unwrap()
                    .into_sequence()
            })
        })
        .collect();

    let actual: Vec<Vec<u16>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn restored_model_generates_the_same_sequence() {
    let corpus: Vec<String> = "C F G C Am F G C Dm G C"
        .split_whitespace()
        .map(String::from)
        .collect();
    let model = build(&corpus, 2).unwrap();

    let json = model.to_json().unwrap();
    let from_json = TransitionModel::<String>::from_json(&json).unwrap();
    let bytes = model.to_binary().unwrap();
    let from_binary = TransitionModel::<String>::from_binary(&bytes).unwrap();

    let generator = Generator::new(24).floor(BackoffFloor::AnySymbol);
    let original = generator.generate_seeded(&model, 77).unwrap();

    assert_eq!(generator.generate_seeded(&from_json, 77).unwrap(), original);
    assert_eq!(generator.generate_seeded(&from_binary, 77).unwrap(), original);
}

#[test]
fn configuration_drives_training_and_generation() {
    let config = EngineConfig::from_json(
        r#"{
            "training": { "order": 1 },
            "generation": { "target_length": 10, "floor": "stop", "rng_seed": 3 }
        }"#,
    )
    .unwrap();

    let model = ModelBuilder::from_config(&config.training)
        .sequence(["C", "G", "Am", "F", "C", "G", "F", "C"])
        .build()
        .unwrap();
    let generator = Generator::from_config(&config.generation);

    let first = generator.run(&model).unwrap();
    let second = generator.run(&model).unwrap();

    assert_eq!(model.order(), 1);
    assert_eq!(first, second);
    assert_eq!(first.len(), 10);
    assert!(first
        .origins()
        .iter()
        .all(|origin| *origin == StepOrigin::Exact));
}
