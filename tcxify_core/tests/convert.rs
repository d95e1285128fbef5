use pretty_assertions::assert_eq;
use quick_xml::{events::Event, Reader};
use serde_json::{json, Value};
use tcxify_core::{
    altitude::{altitude_delta_metres, GradeCalibration, IndoorBikeCalibration},
    error::ConversionError,
    formatting::parse_start_time,
    model::Sport,
    pipeline::{convert, ConversionOptions},
    read::read_export_from_slice,
    tcx_writer::{write_tcx_to_file, write_tcx_to_writer},
};

const LEVEL: f64 = 12.0;

/// A 100 second bike ride at a steady 36 km/h on resistance level 12, with a
/// reported distance that only updates every 10 seconds and ends 1% above
/// the integrated distance. Followed by 5 idle samples. Cadence is missing
/// from every odd sample and the heart-rate series stops at t=90.
fn bike_export() -> Value {
    let mut samples = Vec::new();
    for t in 0..=100u32 {
        let reported = if t == 100 { 1010.0 } else { f64::from(t / 10) * 100.0 };
        let rpm = if t % 2 == 0 { json!(80 + t / 10) } else { Value::Null };
        samples.push(json!({ "t": t, "vs": [reported, 36.0, 150, rpm, LEVEL] }));
    }
    for t in 101..=105u32 {
        samples.push(json!({ "t": t, "vs": [1010.0, 0, 0, 0, LEVEL] }));
    }

    let hr: Vec<_> = (0..=18).map(|i| json!({ "t": i * 5, "hr": 100 + i })).collect();

    json!({
        "data": {
            "equipmentType": "Bike Forma",
            "analitics": {
                "descriptor": [
                    { "i": 0, "pr": { "name": "HDistance" } },
                    { "i": 1, "pr": { "name": "Speed" } },
                    { "i": 2, "pr": { "name": "Power" } },
                    { "i": 3, "pr": { "name": "Rpm" } },
                    { "i": 4, "pr": { "name": "Level" } }
                ],
                "samples": samples,
                "hr": hr
            }
        }
    })
}

/// A treadmill run with grade and the running specific fields, and no heart
/// rate.
fn treadmill_export() -> Value {
    json!({
        "data": {
            "equipmentType": "Treadmill",
            "analitics": {
                "descriptor": ["HDistance", "Speed", "Power", "RunningCadence", "RunningPower", "Grade"],
                "samples": [
                    { "t": 0, "vs": [0, 0, 0, 0, 0, 0] },
                    { "t": 10, "vs": [20, 7.2, 0, 150, 200, 2] },
                    { "t": 20, "vs": [40, 7.2, 0, 152, 205, 2] },
                    { "t": 30, "vs": [61, 7.2, 0, 154, 210, 2] },
                    { "t": 40, "vs": [61, 0, 0, 0, 0, 0] }
                ]
            }
        }
    })
}

fn options() -> ConversionOptions {
    ConversionOptions::new(parse_start_time("2024-03-01T18:30").unwrap())
}

fn to_bytes(v: &Value) -> Vec<u8> {
    serde_json::to_vec(v).unwrap()
}

#[test]
fn bike_ride_is_reconstructed() {
    let export = read_export_from_slice(&to_bytes(&bike_export())).unwrap();
    let log = convert(&export, &options()).unwrap();

    assert_eq!(log.sport, Sport::Biking);
    assert_eq!(log.trackpoints.len(), 101);
    assert_eq!(log.total_time.whole_seconds(), 100);

    let tps = &log.trackpoints;
    for pair in tps.windows(2) {
        assert!(pair[1].distance_metres >= pair[0].distance_metres);
        assert!(pair[1].time > pair[0].time);
    }
    assert!((tps[100].distance_metres - 1010.0).abs() < 1e-6);
    assert!((log.summary.scale_factor - 1.01).abs() < 1e-9);

    let grade = IndoorBikeCalibration.grade_percent(LEVEL);
    let expected_altitude = altitude_delta_metres(1010.0, grade);
    assert!((tps[100].altitude_metres - expected_altitude).abs() < 1e-6);
    assert!((log.summary.final_altitude_metres - expected_altitude).abs() < 1e-6);
    assert_eq!(tps[0].altitude_metres, 0.0);

    // Odd samples have no cadence and repeat the previous one.
    assert_eq!(tps[0].cadence, 80.0);
    assert_eq!(tps[1].cadence, 80.0);
    assert_eq!(tps[21].cadence, 82.0);
    assert!(tps.iter().all(|tp| tp.watts == 150.0));
    assert!(tps.iter().all(|tp| (tp.speed_mps - 10.0).abs() < 1e-12));

    // Heart rate looks forward to the next entry, then sticks at the last.
    assert_eq!(tps[0].heart_rate_bpm, Some(100));
    assert_eq!(tps[7].heart_rate_bpm, Some(102));
    assert_eq!(tps[90].heart_rate_bpm, Some(118));
    assert_eq!(tps[100].heart_rate_bpm, Some(118));
    assert_eq!(log.summary.max_heart_rate, Some(118));
}

#[test]
fn treadmill_run_uses_grade_and_running_fields() {
    let export = read_export_from_slice(&to_bytes(&treadmill_export())).unwrap();
    let mut opts = options();
    opts.initial_altitude_metres = 100.0;

    let log = convert(&export, &opts).unwrap();

    assert_eq!(log.sport, Sport::Running);
    assert_eq!(log.trackpoints.len(), 4);
    let last = log.trackpoints.last().unwrap();
    assert!((last.distance_metres - 61.0).abs() < 1e-9);
    assert!((last.altitude_metres - (100.0 + altitude_delta_metres(61.0, 2.0))).abs() < 1e-9);
    assert_eq!(last.cadence, 154.0);
    assert_eq!(last.watts, 210.0);
    assert!(log.trackpoints.iter().all(|tp| tp.heart_rate_bpm.is_none()));
    // Three steps of 20.3m (rounded) at 2% over the 60m integrated distance.
    assert!((log.summary.average_gradient_percent - 2.03).abs() < 1e-9);
}

#[test]
fn written_tcx_is_well_formed_and_ordered() {
    let export = read_export_from_slice(&to_bytes(&bike_export())).unwrap();
    let log = convert(&export, &options()).unwrap();
    let mut buf = Vec::new();
    write_tcx_to_writer(&mut buf, &log).unwrap();
    let xml = String::from_utf8(buf).unwrap();

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut trackpoints = 0;
    let mut first_trackpoint_children = Vec::new();
    let mut activity_id = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                if name == "Trackpoint" {
                    trackpoints += 1;
                }
                if trackpoints == 1 && path.last().map(String::as_str) == Some("Trackpoint") {
                    first_trackpoint_children.push(name.clone());
                }
                if name == "Activity" {
                    let sport = e.try_get_attribute("Sport").unwrap().unwrap();
                    assert_eq!(sport.value.as_ref(), b"Biking");
                }
                path.push(name);
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                assert_eq!(path.pop(), Some(name));
            }
            Ok(Event::Text(t)) => {
                if path.last().map(String::as_str) == Some("Id") {
                    activity_id = Some(t.unescape().unwrap().into_owned());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("Error at position {}: {:?}", reader.error_position(), e),
        }
    }

    assert!(path.is_empty());
    assert_eq!(trackpoints, 101);
    assert_eq!(activity_id.as_deref(), Some("2024-03-01T18:30:00Z"));
    assert_eq!(
        first_trackpoint_children,
        vec!["Time", "AltitudeMeters", "DistanceMeters", "HeartRateBpm", "Cadence", "Extensions"]
    );
}

#[test]
fn corrupt_distance_aborts() {
    let mut doc = bike_export();
    // The reported total is now 25% more than the integrated one.
    doc["data"]["analitics"]["samples"][100]["vs"][0] = json!(1250.0);
    let export = read_export_from_slice(&to_bytes(&doc)).unwrap();

    let err = convert(&export, &options()).unwrap_err();

    assert!(matches!(err, ConversionError::DistanceSanity { .. }), "{err:?}");
}

#[test]
fn idle_recording_is_empty() {
    let doc = json!({ "data": { "analitics": {
        "descriptor": ["HDistance", "Speed", "Power"],
        "samples": [ { "t": 0, "vs": [0, 0, 0] }, { "t": 1, "vs": [0, 0, 0] } ]
    } } });
    let export = read_export_from_slice(&to_bytes(&doc)).unwrap();

    let err = convert(&export, &options()).unwrap_err();

    assert!(matches!(err, ConversionError::EmptyActivity));
}

#[test]
fn wrong_export_is_malformed() {
    let doc = json!({ "data": { "workouts": [] } });
    let err = read_export_from_slice(&to_bytes(&doc)).unwrap_err();
    assert!(matches!(err, ConversionError::MalformedInput(_)));
    assert!(err.to_string().contains("Export the workout again"));
}

#[test]
fn writes_file() {
    let export = read_export_from_slice(&to_bytes(&treadmill_export())).unwrap();
    let log = convert(&export, &options()).unwrap();
    let path = std::env::temp_dir().join(format!("tcxify-test-{}.tcx", std::process::id()));

    write_tcx_to_file(&path, &log).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(contents.starts_with("<?xml"));
    assert_eq!(contents.matches("<Trackpoint>").count(), 4);
    assert!(contents.contains("<Activity Sport=\"Running\">"));
}
