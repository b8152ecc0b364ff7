//! End-to-end pipeline test: raw JSON documents in, ranked candidates out.
//!
//! The fixture mimics an archived stream with steady background chat, a
//! reaction burst between 200s and 250s, a continuous subtitle block, and
//! one discourse-marker topic change.

use serde_json::{json, Value};

use clipmine_analyzer::{ClipGenerator, CommentAnalyzer, GeneratorConfig, SubtitleAnalyzer};
use clipmine_ingest::{parse_chat_log, parse_subtitle_document};

fn chat_event(t_secs: u64, author: &str, text: &str) -> Value {
    json!({
        "replayChatItemAction": {
            "actions": [{
                "addChatItemAction": {
                    "item": {
                        "liveChatTextMessageRenderer": {
                            "timestampUsec": (t_secs * 1_000_000).to_string(),
                            "authorName": { "simpleText": author },
                            "message": { "runs": [{ "text": text }] }
                        }
                    }
                }
            }]
        }
    })
}

/// Steady chat every 5s for ~8 minutes, plus a one-per-second 草 burst over
/// 200..250s. The burst events come after the steady ones, so the document
/// is deliberately unsorted.
fn chat_fixture() -> String {
    let background = ["面白い", "なるほど", "こんにちは", "いいね"];

    let mut events = Vec::new();
    for i in 0..100u64 {
        events.push(chat_event(
            i * 5,
            &format!("User{}", i % 10),
            background[(i % 4) as usize],
        ));
    }
    for i in 0..50u64 {
        events.push(chat_event(200 + i, &format!("User{}", i % 10), "草生える"));
    }

    json!({ "events": events }).to_string()
}

fn subtitle_fixture() -> String {
    let texts = [
        "こんにちは",
        "今日はゲームをやっていきます",
        "操作の説明です",
        "敵が強いですね",
        "アイテムを拾いました",
        "ボスの部屋に入ります",
        "それでは本題です",
        "ありがとうございました",
    ];

    let subtitles: Vec<Value> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| json!({ "start": (i as f64) * 5.0, "duration": 5.0, "text": text }))
        .collect();

    json!({ "subtitles": subtitles }).to_string()
}

#[test]
fn full_pipeline_ranks_the_burst_region_first() {
    let comments = CommentAnalyzer::new(parse_chat_log(&chat_fixture()).unwrap());
    let subtitles = SubtitleAnalyzer::new(parse_subtitle_document(&subtitle_fixture()).unwrap());

    assert_eq!(comments.len(), 150);
    assert_eq!(subtitles.len(), 8);

    let generator = ClipGenerator::new(Some(&comments), Some(&subtitles));
    let candidates = generator
        .generate_candidates(&GeneratorConfig::default())
        .unwrap();

    assert_eq!(candidates.len(), 3);

    // Ranked descending, scores clamped to [0, 1]
    for pair in candidates.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for candidate in &candidates {
        assert!((0.0..=1.0).contains(&candidate.score));
        assert!(candidate.duration() >= 30.0 && candidate.duration() <= 180.0);
    }

    // The comment surge and keyword burst around 200..250s overlap by more
    // than half and merge into the top candidate
    let top = &candidates[0];
    assert_eq!(top.start, 185.0);
    assert_eq!(top.end, 260.0);
    assert!(top.reasons.iter().any(|r| r == "comment surge"));
    assert!(top.reasons.iter().any(|r| r == "keyword burst"));
    // 0.6 for two reasons + 12/100 peak volume + 50/50 capped at 0.2
    assert!((top.score - 0.92).abs() < 1e-9);

    // The continuous subtitle block survives as its own candidate ahead of
    // the topic shift (equal scores keep merge order)
    assert_eq!(candidates[1].reasons, vec!["subtitle segment"]);
    assert_eq!(candidates[1].start, 0.0);
    assert_eq!(candidates[1].end, 40.0);

    assert_eq!(candidates[2].reasons, vec!["topic shift: それでは"]);
    assert_eq!(candidates[2].start, 30.0);
    assert_eq!(candidates[2].end, 90.0);
}

#[test]
fn comment_only_analysis_still_produces_candidates() {
    let comments = CommentAnalyzer::new(parse_chat_log(&chat_fixture()).unwrap());
    let generator = ClipGenerator::new(Some(&comments), None);
    let candidates = generator
        .generate_candidates(&GeneratorConfig::default())
        .unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].start, 185.0);
    assert_eq!(candidates[0].end, 260.0);
}

#[test]
fn subtitle_only_analysis_still_produces_candidates() {
    let subtitles = SubtitleAnalyzer::new(parse_subtitle_document(&subtitle_fixture()).unwrap());
    let generator = ClipGenerator::new(None, Some(&subtitles));
    let candidates = generator
        .generate_candidates(&GeneratorConfig::default())
        .unwrap();

    assert_eq!(candidates.len(), 2);
    assert!(candidates
        .iter()
        .any(|c| c.reasons == vec!["subtitle segment"]));
    assert!(candidates
        .iter()
        .any(|c| c.reasons == vec!["topic shift: それでは"]));
}

#[test]
fn empty_documents_yield_an_empty_ranking() {
    let comments = CommentAnalyzer::new(parse_chat_log(r#"{ "events": [] }"#).unwrap());
    let subtitles =
        SubtitleAnalyzer::new(parse_subtitle_document(r#"{ "subtitles": [] }"#).unwrap());

    let generator = ClipGenerator::new(Some(&comments), Some(&subtitles));
    let candidates = generator
        .generate_candidates(&GeneratorConfig::default())
        .unwrap();

    assert!(candidates.is_empty());
}
