use super::*;

// -------------------- Topic --------------------

#[test]
fn topic_ids_and_slots() {
    for (i, topic) in Topic::ALL.iter().enumerate() {
        assert_eq!(usize::from(topic.id()), i);
        assert_eq!(topic.slot(), i + 1);
    }
    assert_eq!(Topic::SLOTS, 8);
}

#[test]
fn topic_try_from() {
    assert_eq!(Topic::try_from(2), Ok(Topic::Sports));
    assert_eq!(Topic::try_from(7), Err(UnknownTopic(7)));
}

#[test]
fn topic_serializes_as_number() {
    let json = serde_json::to_string(&Topic::Science).unwrap();
    assert_eq!(json, "5");
    let back: Topic = serde_json::from_str("6").unwrap();
    assert_eq!(back, Topic::Technology);
    assert!(serde_json::from_str::<Topic>("9").is_err());
}

#[test]
fn topic_names() {
    assert_eq!(Topic::NationalNews.name(), "National News");
    assert_eq!(Topic::Technology.to_string(), "Technology");
}

// -------------------- SourceArticle --------------------

#[test]
fn picture_requires_bytes() {
    let no_thumb = SourceArticle::new("a", Topic::Sports);
    assert!(no_thumb.picture().is_none());

    let empty = SourceArticle::new("b", Topic::Sports).with_thumbnail(Vec::new(), "cap");
    assert!(empty.thumbnail.is_some());
    assert!(empty.picture().is_none());

    let full = SourceArticle::new("c", Topic::Sports).with_thumbnail(vec![1, 2, 3], "");
    assert_eq!(full.picture().unwrap().image, vec![1, 2, 3]);
}

#[test]
fn body_defaults_to_empty() {
    let a = SourceArticle::new("t", Topic::Business);
    assert_eq!(a.body(), "");
    assert_eq!(a.with_content("text").body(), "text");
}

// -------------------- Similarity --------------------

#[test]
fn quick_ratio_identical_and_disjoint() {
    assert_eq!(quick_ratio("hello world", "hello world"), 1.0);
    assert_eq!(quick_ratio("abc def", "xyz uvw"), 0.0);
    assert_eq!(quick_ratio("", ""), 1.0);
    assert_eq!(quick_ratio("abc", ""), 0.0);
}

#[test]
fn quick_ratio_counts_words_not_letters() {
    // Same letters, different words.
    assert_eq!(quick_ratio("listen", "silent"), 0.0);
    // Same words in another order.
    assert_eq!(quick_ratio("storm hits coast", "coast hits storm"), 1.0);
}

#[test]
fn quick_ratio_ignores_case_and_punctuation() {
    assert_eq!(quick_ratio("Rain, then SUN.", "rain then sun!"), 1.0);
}

#[test]
fn quick_ratio_partial_overlap() {
    // shared: the, cat -> 2 * 2 / 6
    let r = quick_ratio("the cat sat", "the cat ran");
    assert!((r - 4.0 / 6.0).abs() < 1e-9);
}

const BUDGET_STORY: &str = "The city council approved a revised budget on Tuesday night after \
    a lengthy public hearing. The plan raises spending on road repairs and public \
    transit while trimming administrative costs in several departments. Council \
    members said the changes respond to resident complaints about potholes and \
    delayed buses. The mayor is expected to sign the measure later this week, and \
    the new budget takes effect at the start of the fiscal year in July.";

const FROG_STORY: &str = "Biologists working in a remote cloud forest have described a new \
    species of tree frog with bright orange markings on its legs. The tiny \
    amphibian was first heard calling near a mountain stream during a night survey. \
    Genetic tests confirmed it differs from every known relative in the region. \
    The team warns that logging threatens its small habitat and has asked local \
    authorities to extend protection to the surrounding slopes.";

#[test]
fn unrelated_long_bodies_are_not_duplicates() {
    assert!(quick_ratio(BUDGET_STORY, FROG_STORY) < DUPLICATE_RATIO);
    assert!(!is_duplicate_body(FROG_STORY, &[BUDGET_STORY]));
}

#[test]
fn title_match_is_case_insensitive() {
    let history = vec!["Huracán se acerca".to_string()];
    assert!(is_duplicate_title("HURACÁN SE ACERCA", &history));
    assert!(!is_duplicate_title("Huracán se aleja", &history));
}

#[test]
fn body_threshold() {
    let previous = ["The governor announced new funding for schools today."];
    assert!(is_duplicate_body(
        "The governor announced new funding for schools today!",
        &previous
    ));
    assert!(!is_duplicate_body("Baseball season opens", &previous));
}

// -------------------- Selection --------------------

fn article(title: &str, topic: Topic, body: &str) -> SourceArticle {
    SourceArticle::new(title, topic).with_content(body)
}

#[test]
fn selection_drops_seen_titles() {
    let history = vec!["Old Story".to_string()];
    let picked = select_articles(
        vec![
            article("old story", Topic::Sports, "x"),
            article("New Story", Topic::Sports, "y"),
        ],
        &history,
        SelectionLimits::default(),
    );
    assert_eq!(picked.accepted.len(), 1);
    assert_eq!(picked.accepted[0].title, "New Story");
    assert_eq!(picked.rejected[0].reason, RejectReason::SeenTitle);
}

#[test]
fn selection_drops_similar_bodies() {
    let picked = select_articles(
        vec![
            article("One", Topic::Sports, "The team won the championship game."),
            article("Two", Topic::Business, "The team won the championship game!"),
            article("Three", Topic::Science, "Researchers mapped a coral reef."),
        ],
        &Vec::<String>::new(),
        SelectionLimits::default(),
    );
    let titles: Vec<_> = picked.accepted.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Three"]);
    assert_eq!(picked.rejected[0].reason, RejectReason::SimilarBody);
}

#[test]
fn selection_keeps_distinct_long_bodies() {
    let picked = select_articles(
        vec![
            article("Budget passes", Topic::NationalNews, BUDGET_STORY),
            article("New frog found", Topic::Science, FROG_STORY),
        ],
        &Vec::<String>::new(),
        SelectionLimits::default(),
    );
    assert_eq!(picked.accepted.len(), 2);
    assert!(picked.rejected.is_empty());
}

#[test]
fn selection_keeps_articles_without_content() {
    let picked = select_articles(
        vec![
            SourceArticle::new("A", Topic::Sports),
            SourceArticle::new("B", Topic::Sports),
        ],
        &Vec::<String>::new(),
        SelectionLimits::default(),
    );
    assert_eq!(picked.accepted.len(), 2);
}

#[test]
fn selection_applies_caps() {
    let limits = SelectionLimits {
        max_articles: 3,
        max_per_topic: 2,
    };
    let candidates = vec![
        article("s1", Topic::Sports, "aaaa"),
        article("s2", Topic::Sports, "bbbb"),
        article("s3", Topic::Sports, "cccc"),
        article("b1", Topic::Business, "dddd"),
        article("b2", Topic::Business, "eeee"),
    ];
    let picked = select_articles(candidates, &Vec::<String>::new(), limits);
    let titles: Vec<_> = picked.accepted.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["s1", "s2", "b1"]);
    let reasons: Vec<_> = picked.rejected.iter().map(|r| r.reason).collect();
    assert_eq!(reasons, vec![RejectReason::TopicFull, RejectReason::Overflow]);
}
