use discovery_service::models::{RecommendationTier, UserProfile};
use discovery_service::{CompatibilityScorer, ScoringWeights, TasteTables};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("discovery_service=debug")
        .with_test_writer()
        .try_init();
}

fn profile(
    id: &str,
    genres: &[&str],
    authors: &[&str],
    interests: &[&str],
    bio: Option<&str>,
) -> UserProfile {
    UserProfile {
        user_id: id.to_string(),
        city: "İstanbul".to_string(),
        coordinates: None,
        favorite_genres: genres.iter().map(|s| s.to_string()).collect(),
        favorite_authors: authors.iter().map(|s| s.to_string()).collect(),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        bio: bio.map(|s| s.to_string()),
    }
}

fn assert_in_unit_interval(label: &str, value: f32) {
    assert!(
        (0.0..=1.0).contains(&value) && value.is_finite(),
        "{} out of [0, 1]: {}",
        label,
        value
    );
}

fn assert_result_bounded(result: &discovery_service::models::CompatibilityResult) {
    assert_in_unit_interval("overall", result.overall_score);
    assert_in_unit_interval("genre", result.genre_score);
    assert_in_unit_interval("interest", result.interest_score);
    assert_in_unit_interval("author", result.author_score);
    assert_in_unit_interval("intellectual", result.intellectual_score);
    assert_in_unit_interval("pattern", result.reading_pattern_score);
}

#[test]
fn single_common_genre_scores_between_zero_and_one() {
    init_tracing();
    let scorer = CompatibilityScorer::new();

    let a = profile("u1", &["Felsefi", "Roman"], &[], &[], None);
    let b = profile("u2", &["Felsefi", "Tarih"], &[], &[], None);

    let result = scorer.score(Some(&a), Some(&b));
    assert!(result.genre_score > 0.0 && result.genre_score < 1.0);
    assert!(result
        .match_reasons
        .contains(&"1 ortak tür".to_string()));
}

#[test]
fn blank_profiles_score_zero_with_no_reasons() {
    init_tracing();
    let scorer = CompatibilityScorer::new();

    let a = profile("u1", &[], &[], &[], None);
    let b = profile("u2", &[], &[], &[], None);

    let result = scorer.score(Some(&a), Some(&b));
    assert_eq!(result.overall_score, 0.0);
    assert_eq!(result.tier, RecommendationTier::Low);
    assert!(result.match_reasons.is_empty());
    assert_result_bounded(&result);
}

#[test]
fn missing_profile_degrades_to_zero() {
    init_tracing();
    let scorer = CompatibilityScorer::new();
    let a = profile("u1", &["Roman"], &["Orhan Pamuk"], &["yoga"], None);

    for result in [
        scorer.score(None, Some(&a)),
        scorer.score(Some(&a), None),
        scorer.score(None, None),
    ] {
        assert_eq!(result.overall_score, 0.0);
        assert_eq!(result.tier, RecommendationTier::Low);
        assert!(result.match_reasons.is_empty());
    }
}

#[test]
fn score_is_symmetric() {
    init_tracing();
    let scorer = CompatibilityScorer::new();

    let pairs = [
        (
            profile(
                "u1",
                &["Felsefi", "Roman"],
                &["Orhan Pamuk", "Franz Kafka"],
                &["felsefe", "yoga"],
                Some("Kadıköy'de kitapçı gezgini"),
            ),
            profile(
                "u2",
                &["Felsefi", "Tarih", "Şiir"],
                &["Orhan Pamuk"],
                &["felsefe", "koşu", "resim"],
                Some("Deneme okuru"),
            ),
        ),
        (
            profile("u3", &["Gezi"], &[], &["moda"], None),
            profile("u4", &["Polisiye", "Mizah"], &["Agatha Christie"], &[], None),
        ),
        (
            profile("u5", &[], &[], &[], Some("sadece biyografi")),
            profile("u6", &["Roman"], &[], &[], None),
        ),
    ];

    for (a, b) in &pairs {
        let ab = scorer.score(Some(a), Some(b));
        let ba = scorer.score(Some(b), Some(a));
        assert_eq!(
            ab.overall_score, ba.overall_score,
            "asymmetric for {} / {}",
            a.user_id, b.user_id
        );
        assert_eq!(ab.genre_score, ba.genre_score);
        assert_eq!(ab.interest_score, ba.interest_score);
        assert_eq!(ab.author_score, ba.author_score);
        assert_eq!(ab.intellectual_score, ba.intellectual_score);
        assert_eq!(ab.reading_pattern_score, ba.reading_pattern_score);
    }
}

#[test]
fn scores_stay_bounded_for_adversarial_profiles() {
    init_tracing();
    let scorer = CompatibilityScorer::new();

    let many: Vec<String> = (0..40).map(|i| format!("tür {}", i)).collect();
    let many_refs: Vec<&str> = many.iter().map(|s| s.as_str()).collect();
    let long_bio = "uzun ".repeat(500);

    let cases = [
        profile("u1", &[], &[], &[], None),
        profile("u2", &many_refs, &many_refs, &many_refs, Some("x")),
        profile(
            "u3",
            &["Felsefi", "Felsefi", " Felsefi "],
            &["Orhan Pamuk", "Orhan Pamuk"],
            &["FELSEFE", "felsefe"],
            Some(long_bio.as_str()),
        ),
    ];

    for a in &cases {
        for b in &cases {
            let result = scorer.score(Some(a), Some(b));
            assert_result_bounded(&result);
        }
    }
}

#[test]
fn identical_rich_profiles_reach_high_tier() {
    init_tracing();
    let scorer = CompatibilityScorer::new();

    let a = profile(
        "u1",
        &["Felsefi", "Roman", "Şiir"],
        &["Orhan Pamuk", "Fyodor Dostoyevski"],
        &["felsefe", "edebiyat", "yoga"],
        Some("Her akşam bir bölüm"),
    );
    let mut b = a.clone();
    b.user_id = "u2".to_string();

    let result = scorer.score(Some(&a), Some(&b));
    // genre 1.0, interest 1.0, author 1.0, pattern 1.0 under the
    // default 0.25/0.30/0.20/0.10 shares already clear 0.75.
    assert_eq!(result.tier, RecommendationTier::High);
    assert!(result.overall_score >= 0.75);
    assert_result_bounded(&result);
}

#[test]
fn score_is_pure_and_never_mutates_profiles() {
    init_tracing();
    let scorer = CompatibilityScorer::new();

    let a = profile(
        "u1",
        &["Felsefi", "Roman"],
        &["Orhan Pamuk"],
        &["felsefe"],
        Some("okur"),
    );
    let b = profile("u2", &["Felsefi"], &["Franz Kafka"], &["bilim"], None);

    let a_before = a.clone();
    let b_before = b.clone();

    let first = scorer.score(Some(&a), Some(&b));
    let second = scorer.score(Some(&a), Some(&b));

    assert_eq!(first, second);
    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}

#[test]
fn rank_sorts_descending_and_keeps_ties_stable() {
    init_tracing();
    let scorer = CompatibilityScorer::new();

    let target = profile(
        "u1",
        &["Felsefi", "Roman"],
        &["Orhan Pamuk"],
        &["felsefe", "yoga"],
        Some("okur"),
    );
    let twin_a = profile("twin-a", &["Felsefi"], &[], &[], None);
    let twin_b = profile("twin-b", &["Felsefi"], &[], &[], None);
    let kindred = profile(
        "kindred",
        &["Felsefi", "Roman"],
        &["Orhan Pamuk"],
        &["felsefe"],
        Some("yazar"),
    );

    let ranked = scorer.rank(
        &target,
        &[twin_a.clone(), kindred.clone(), twin_b.clone()],
    );

    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].profile.user_id, "kindred");
    // Identical twins tie; the stable sort keeps their input order.
    assert_eq!(ranked[1].profile.user_id, "twin-a");
    assert_eq!(ranked[2].profile.user_id, "twin-b");
    assert!(
        ranked[0].compatibility.overall_score >= ranked[1].compatibility.overall_score
    );
    assert_eq!(
        ranked[1].compatibility.overall_score,
        ranked[2].compatibility.overall_score
    );
}

#[test]
fn custom_weights_are_validated() {
    init_tracing();

    let bad = ScoringWeights {
        genre: 0.9,
        interest: 0.9,
        author: 0.0,
        intellectual: 0.0,
        pattern: 0.0,
    };
    assert!(bad.validate().is_err());
    ScoringWeights::default().validate().unwrap();

    // A custom scorer still behaves with swapped tables.
    let scorer = CompatibilityScorer::with_tables(TasteTables::default(), ScoringWeights::default());
    let a = profile("u1", &["Roman"], &[], &[], None);
    let b = profile("u2", &["Roman"], &[], &[], None);
    assert!(scorer.score(Some(&a), Some(&b)).genre_score > 0.0);
}

#[test]
fn result_serializes_to_json() {
    init_tracing();
    let scorer = CompatibilityScorer::new();

    let a = profile("u1", &["Felsefi"], &[], &["felsefe"], None);
    let b = profile("u2", &["Felsefi"], &[], &["felsefe"], None);

    let result = scorer.score(Some(&a), Some(&b));
    let json = serde_json::to_value(&result).unwrap();

    assert!(json["overallScore"].is_number());
    assert_eq!(json["tier"], "medium");
    assert!(json["matchReasons"].is_array());
}
