use super::*;
use crate::geom::{GeomError, Point2D};
use nalgebra::vector;

fn cfg() -> CuttingCfg {
    CuttingCfg::default()
}

fn run(stage: Stage, events: &[Event]) -> Stage {
    events
        .iter()
        .fold(stage, |s, ev| s.step(*ev, &cfg()).unwrap())
}

fn calibrated() -> Stage {
    run(
        Stage::Empty,
        &[
            Event::PageLoaded,
            Event::Begin,
            Event::Click(vector![0.0, 0.0]),
            Event::Click(vector![100.0, 0.0]),
            Event::Click(vector![50.0, 10.0]),
        ],
    )
}

#[test]
fn walks_through_calibration_stages() {
    let s = run(Stage::Empty, &[Event::PageLoaded]);
    assert_eq!(s, Stage::Loaded);
    let s = s.step(Event::Begin, &cfg()).unwrap();
    assert_eq!(s, Stage::TopLeft { cursor: None });
    let s = s.step(Event::Click(vector![0.0, 0.0]), &cfg()).unwrap();
    assert_eq!(s.name(), "top_right");
    let s = s.step(Event::Click(vector![100.0, 0.0]), &cfg()).unwrap();
    assert_eq!(s.name(), "height");
    let s = s.step(Event::Click(vector![50.0, 10.0]), &cfg()).unwrap();
    match &s {
        Stage::Cutting {
            frame,
            break_points,
            cursor,
        } => {
            assert!(break_points.is_empty());
            assert!(cursor.is_none());
            assert!((frame.height - 10.0).abs() < 1e-12);
        }
        other => panic!("expected cutting, got {other:?}"),
    }
}

#[test]
fn pointer_moves_only_touch_the_cursor() {
    let p = vector![12.0, 34.0];
    let s = Stage::TopLeft { cursor: None }
        .step(Event::PointerMove(p), &cfg())
        .unwrap();
    assert_eq!(s, Stage::TopLeft { cursor: Some(p) });
    // Ignored where no cursor is tracked.
    assert_eq!(Stage::Loaded.step(Event::PointerMove(p), &cfg()), Ok(Stage::Loaded));
}

#[test]
fn coincident_top_right_is_rejected() {
    let s = run(
        Stage::Loaded,
        &[Event::Begin, Event::Click(vector![5.0, 5.0])],
    );
    assert_eq!(
        s.step(Event::Click(vector![5.0, 5.0]), &cfg()),
        Err(StepError::Geometry(GeomError::CoincidentPoints))
    );
}

#[test]
fn collinear_staff_height_is_rejected() {
    let s = run(
        Stage::Loaded,
        &[
            Event::Begin,
            Event::Click(vector![0.0, 0.0]),
            Event::Click(vector![100.0, 0.0]),
        ],
    );
    assert_eq!(
        s.step(Event::Click(vector![30.0, 0.0]), &cfg()),
        Err(StepError::Geometry(GeomError::DegenerateTriangle))
    );
}

#[test]
fn unexpected_events_are_named() {
    let err = Stage::Empty
        .step(Event::Click(vector![1.0, 1.0]), &cfg())
        .unwrap_err();
    assert_eq!(
        err,
        StepError::Unexpected {
            stage: "empty",
            event: "click"
        }
    );
    assert_eq!(err.to_string(), "event `click` is not accepted in stage `empty`");
    assert!(calibrated().step(Event::Commit, &cfg()).is_err());
}

#[test]
fn reset_returns_to_empty_from_anywhere() {
    assert_eq!(calibrated().step(Event::Reset, &cfg()), Ok(Stage::Empty));
}

#[test]
fn break_points_accumulate_until_threshold() {
    let s = run(
        calibrated(),
        &[Event::Click(vector![30.0, 5.0]), Event::Click(vector![70.0, 5.0])],
    );
    match &s {
        Stage::Cutting { break_points, .. } => assert_eq!(break_points.len(), 2),
        other => panic!("expected cutting, got {other:?}"),
    }
    let done = s.step(Event::Click(vector![99.5, 5.0]), &cfg()).unwrap();
    let Stage::Saving { break_points, .. } = &done else {
        panic!("expected saving, got {done:?}");
    };
    assert_eq!(break_points.len(), 3);
    let boxes = done.finished_bar_boxes(0, 0).unwrap();
    assert_eq!(boxes.len(), 3);
    assert!((boxes[2].width - 29.5).abs() < 1e-9);
    assert_eq!(done.step(Event::Commit, &cfg()), Ok(Stage::Empty));
}

#[test]
fn trigger_point_can_be_excluded() {
    let cfg = CuttingCfg {
        finish_threshold: 0.9,
        include_trigger_point: false,
    };
    let s = calibrated()
        .step(Event::Click(vector![40.0, 5.0]), &cfg)
        .unwrap()
        .step(Event::Click(vector![95.0, 5.0]), &cfg)
        .unwrap();
    let Stage::Saving { break_points, .. } = &s else {
        panic!("expected saving, got {s:?}");
    };
    assert_eq!(break_points, &vec![vector![40.0, 5.0]]);
}

#[test]
fn previews_follow_the_cursor() {
    let s = run(
        Stage::Loaded,
        &[
            Event::Begin,
            Event::Click(vector![0.0, 0.0]),
            Event::PointerMove(vector![80.0, 0.0]),
        ],
    );
    let top = s.top_edge().unwrap();
    assert_eq!(top.p2, vector![80.0, 0.0]);
    assert!(s.frame().is_none());

    let s = run(
        s,
        &[
            Event::Click(vector![100.0, 0.0]),
            Event::PointerMove(vector![20.0, 15.0]),
        ],
    );
    let frame = s.frame().unwrap();
    assert!((frame.height - 15.0).abs() < 1e-12);

    let s = run(
        s,
        &[
            Event::Click(vector![50.0, 10.0]),
            Event::Click(vector![30.0, 5.0]),
            Event::PointerMove(vector![60.0, 3.0]),
        ],
    );
    let preview = s.preview_bar_boxes(0, 0);
    assert_eq!(preview.len(), 2);
    assert!((preview[1].width - 30.0).abs() < 1e-9);
    assert!(s.finished_bar_boxes(0, 0).is_none());
}

#[test]
fn session_collects_systems_with_running_indices() {
    let mut session = Session::new(CuttingCfg::default());
    session.load_page(3).unwrap();
    assert_eq!(session.stage(), &Stage::TopLeft { cursor: None });

    let clicks: Vec<Point2D> = vec![
        vector![0.0, 0.0],
        vector![100.0, 0.0],
        vector![50.0, 10.0],
        vector![30.0, 5.0],
        vector![99.0, 5.0],
    ];
    let mut finished = Vec::new();
    for round in 0..2 {
        for (k, p) in clicks.iter().enumerate() {
            let out = session.handle(Event::Click(*p)).unwrap();
            if k + 1 == clicks.len() {
                finished.push(out.map(<[_]>::to_vec).unwrap());
            } else {
                assert!(out.is_none(), "round {round} click {k}");
            }
        }
    }
    assert_eq!(finished[0].len(), 2);
    assert_eq!(finished[1][0].index_in_page, 2);
    assert_eq!(finished[1][1].index_in_document, 3);
    assert_eq!(session.stage(), &Stage::TopLeft { cursor: None });
    assert_eq!(session.page(), 3);
    assert_eq!(session.document().system_count(), 2);
}

#[test]
fn session_keeps_stage_on_rejected_click() {
    let mut session = Session::new(CuttingCfg::default());
    session.load_page(1).unwrap();
    session.handle(Event::Click(vector![5.0, 5.0])).unwrap();
    let before = session.stage().clone();
    assert!(session.handle(Event::Click(vector![5.0, 5.0])).is_err());
    assert_eq!(session.stage(), &before);
}

#[test]
fn session_cuts_a_full_system_after_reset() {
    let mut session = Session::new(CuttingCfg::default());
    session.load_page(2).unwrap();
    session.handle(Event::Click(vector![0.0, 0.0])).unwrap();
    session.handle(Event::Click(vector![100.0, 0.0])).unwrap();
    assert!(session.handle(Event::Reset).unwrap().is_none());
    assert_eq!(session.stage(), &Stage::TopLeft { cursor: None });
    assert_eq!(session.page(), 2);

    let mut out = None;
    for p in [
        vector![0.0, 0.0],
        vector![100.0, 0.0],
        vector![50.0, 10.0],
        vector![30.0, 5.0],
        vector![99.0, 5.0],
    ] {
        out = session.handle(Event::Click(p)).unwrap().map(<[_]>::to_vec);
    }
    let bars = out.unwrap();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].index_in_page, 0);
    assert_eq!(session.document().system_count(), 1);
}

#[test]
fn session_preview_uses_document_offsets() {
    let mut session = Session::new(CuttingCfg::default());
    session.load_page(1).unwrap();
    for p in [
        vector![0.0, 0.0],
        vector![100.0, 0.0],
        vector![50.0, 10.0],
        vector![99.0, 5.0],
    ] {
        session.handle(Event::Click(p)).unwrap();
    }
    for p in [vector![0.0, 20.0], vector![100.0, 20.0], vector![50.0, 30.0]] {
        session.handle(Event::Click(p)).unwrap();
    }
    session.handle(Event::PointerMove(vector![40.0, 25.0])).unwrap();
    let preview = session.preview();
    assert_eq!(preview.len(), 1);
    assert_eq!(preview[0].index_in_page, 1);
    assert_eq!(session.into_document().bar_count(), 1);
}

#[test]
fn config_and_events_deserialize() {
    let cfg: CuttingCfg = serde_json::from_str(r#"{"finish_threshold": 0.9}"#).unwrap();
    assert_eq!(cfg.finish_threshold, 0.9);
    assert!(cfg.include_trigger_point);
    let evs: Vec<Event> = serde_json::from_str(
        r#"[{"kind": "page_loaded"}, {"kind": "click", "at": [1.0, 2.0]}]"#,
    )
    .unwrap();
    assert_eq!(evs, vec![Event::PageLoaded, Event::Click(vector![1.0, 2.0])]);
}
