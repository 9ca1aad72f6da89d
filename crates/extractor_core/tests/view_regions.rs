use extractor_core::{
    update, FormState, Msg, ResultRegion, ScrapeReply, Settlement, PREVIEW_LIMIT,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn submitted() -> FormState {
    let (state, _) = update(
        FormState::new(),
        Msg::DestinationChanged("https://sheet.example.com/d/1".to_string()),
    );
    let (state, _) = update(state, Msg::SubmitClicked);
    state
}

fn settled(settlement: Settlement) -> FormState {
    let (state, _) = update(
        submitted(),
        Msg::ScrapeSettled {
            request_id: 1,
            settlement,
        },
    );
    state
}

#[test]
fn idle_renders_no_region() {
    assert_eq!(FormState::new().view().result, ResultRegion::None);
}

#[test]
fn in_flight_renders_loading_with_status() {
    let state = submitted();
    assert_eq!(
        state.view().result,
        ResultRegion::Loading {
            status: "Starting extraction...".to_string()
        }
    );

    let (state, _) = update(state, Msg::RequestDispatched { request_id: 1 });
    assert_eq!(
        state.view().result,
        ResultRegion::Loading {
            status: "Scraping USPTO data with AI...".to_string()
        }
    );
}

#[test]
fn failure_renders_error_region_only() {
    let state = settled(Settlement::Completed(ScrapeReply {
        success: false,
        message: Some("no results".to_string()),
        ..ScrapeReply::default()
    }));

    assert_eq!(
        state.view().result,
        ResultRegion::Error {
            message: "no results".to_string()
        }
    );
}

#[test]
fn success_preview_is_capped_at_three_records() {
    let data: Vec<_> = (0..7).map(|i| json!({ "us_serial_number": i })).collect();
    let state = settled(Settlement::Completed(ScrapeReply {
        success: true,
        count: 5,
        data: data.clone(),
        message: None,
    }));

    match state.view().result {
        ResultRegion::Success {
            status,
            preview,
            total_records,
        } => {
            assert!(status.contains('5'));
            assert_eq!(preview.len(), PREVIEW_LIMIT);
            assert_eq!(preview, data[..3].to_vec());
            assert_eq!(total_records, 7);
        }
        other => panic!("expected success region, got {other:?}"),
    }
}

#[test]
fn success_with_few_records_shows_all_of_them() {
    let state = settled(Settlement::Completed(ScrapeReply {
        success: true,
        count: 1,
        data: vec![json!({ "mark": "DIGITAL SOLUTIONS" })],
        message: None,
    }));

    match state.view().result {
        ResultRegion::Success { preview, .. } => assert_eq!(preview.len(), 1),
        other => panic!("expected success region, got {other:?}"),
    }
}
