use crate::errors::{DexError, ValidationError};
use crate::team::analyse_team;
use crate::tests::common::{FakeSource, PokemonRecordBuilder};
use pretty_assertions::assert_eq;
use schema::PokemonType;
use std::time::Duration;

fn kanto_source() -> FakeSource {
    [
        (6, "charizard", &["fire", "flying"][..]),
        (9, "blastoise", &["water"][..]),
        (3, "venusaur", &["grass", "poison"][..]),
        (25, "pikachu", &["electric"][..]),
        (143, "snorlax", &["normal"][..]),
        (94, "gengar", &["ghost", "poison"][..]),
        (149, "dragonite", &["dragon", "flying"][..]),
        (1, "bulbasaur", &["grass", "poison"][..]),
        (147, "dratini", &["dragon"][..]),
        (16, "pidgey", &["normal", "flying"][..]),
        (50, "diglett", &["ground"][..]),
        (58, "growlithe", &["fire"][..]),
        (43, "oddish", &["grass", "poison"][..]),
        (114, "tangela", &["grass"][..]),
        (21, "spearow", &["normal", "flying"][..]),
        (36, "clefable", &["fairy"][..]),
    ]
    .into_iter()
    .fold(FakeSource::new(), |source, (id, name, types)| {
        source.with_pokemon(PokemonRecordBuilder::new(id, name).with_types(types).build())
    })
}

const FULL_TEAM: [&str; 6] = ["charizard", "blastoise", "venusaur", "pikachu", "snorlax", "gengar"];

#[tokio::test]
async fn test_empty_team_is_rejected_before_any_lookup() {
    let source = kanto_source();
    let empty: Vec<String> = Vec::new();

    let err = analyse_team(&source, &empty).await.unwrap_err();
    assert_eq!(err, DexError::Validation(ValidationError::EmptyTeam { max: 6 }));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_seven_members_is_rejected_before_any_lookup() {
    let source = kanto_source();
    let mut team = FULL_TEAM.to_vec();
    team.push("dragonite");

    let err = analyse_team(&source, &team).await.unwrap_err();
    assert_eq!(
        err,
        DexError::Validation(ValidationError::TeamTooLarge { max: 6, got: 7 })
    );
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_full_team_resolves_every_slot() {
    let source = kanto_source();
    let analysis = analyse_team(&source, &FULL_TEAM).await.unwrap();

    assert_eq!(analysis.members.len(), 6);
    assert!(analysis.errors.is_empty());
    let slots: Vec<usize> = analysis.members.iter().map(|m| m.slot).collect();
    assert_eq!(slots, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(analysis.members[0].types, vec!["Fire", "Flying"]);
    assert_eq!(analysis.members[0].summary.quad_weak, vec![PokemonType::Rock]);
    assert_eq!(analysis.team_vulnerabilities.len(), PokemonType::COUNT);

    // Gengar is the only Normal and Fighting immunity.
    assert_eq!(analysis.team_vulnerabilities[&PokemonType::Normal].immune_count, 1);
    assert_eq!(analysis.team_vulnerabilities[&PokemonType::Fighting].immune_count, 1);
}

#[tokio::test]
async fn test_one_unknown_member_is_a_slot_error() {
    let source = kanto_source();
    let team = ["charizard", "blastoise", "venusaur", "missingno", "snorlax", "gengar"];

    let analysis = analyse_team(&source, &team).await.unwrap();

    assert_eq!(analysis.members.len(), 5);
    assert_eq!(analysis.errors.len(), 1);
    let error = &analysis.errors[0];
    assert_eq!(error.slot, 4);
    assert_eq!(error.identifier, "missingno");
    assert_eq!(error.error, "Pokemon \"missingno\" not found");

    // Aggregates only cover the five resolved members.
    for row in analysis.team_vulnerabilities.values() {
        assert!(row.weak_count + row.resist_count + row.immune_count <= 5);
    }
    let slots: Vec<usize> = analysis.members.iter().map(|m| m.slot).collect();
    assert_eq!(slots, vec![1, 2, 3, 5, 6]);
}

#[tokio::test]
async fn test_upstream_outage_is_a_slot_error() {
    let source = kanto_source().with_unavailable("pikachu");
    let analysis = analyse_team(&source, &FULL_TEAM).await.unwrap();

    assert_eq!(analysis.members.len(), 5);
    assert_eq!(analysis.errors[0].slot, 4);
    assert!(analysis.errors[0].error.starts_with("Upstream unavailable"));
}

#[tokio::test]
async fn test_every_slot_failing_still_returns_an_analysis() {
    let source = kanto_source();
    let analysis = analyse_team(&source, &["missingno", "glitch"]).await.unwrap();

    assert!(analysis.members.is_empty());
    assert_eq!(analysis.errors.len(), 2);
    assert!(analysis.coverage_gaps.is_empty());
}

#[tokio::test]
async fn test_ice_is_a_gap_when_four_members_are_weak() {
    let source = kanto_source();
    let team = ["tangela", "dratini", "pidgey", "diglett", "blastoise", "growlithe"];

    let analysis = analyse_team(&source, &team).await.unwrap();
    let ice = analysis.team_vulnerabilities[&PokemonType::Ice];

    assert_eq!(ice.weak_count, 4);
    assert_eq!(ice.immune_count, 0);
    assert!(analysis.coverage_gaps.contains(&PokemonType::Ice));
}

#[tokio::test]
async fn test_ice_is_not_a_gap_with_two_weak_members() {
    let source = kanto_source();
    let team = ["tangela", "dratini", "blastoise", "growlithe", "snorlax", "pikachu"];

    let analysis = analyse_team(&source, &team).await.unwrap();

    assert_eq!(analysis.team_vulnerabilities[&PokemonType::Ice].weak_count, 2);
    assert!(!analysis.coverage_gaps.contains(&PokemonType::Ice));
}

#[tokio::test]
async fn test_immunity_cancels_a_gap() {
    let source = kanto_source();
    // Three members weak to Ground, Charizard immune.
    let team = ["pikachu", "growlithe", "gengar", "charizard"];

    let analysis = analyse_team(&source, &team).await.unwrap();
    let ground = analysis.team_vulnerabilities[&PokemonType::Ground];

    assert_eq!(ground.weak_count, 3);
    assert_eq!(ground.immune_count, 1);
    assert!(!analysis.coverage_gaps.contains(&PokemonType::Ground));
}

#[tokio::test]
async fn test_blank_slots_are_skipped_but_keep_numbering() {
    let source = kanto_source();
    let analysis = analyse_team(&source, &["charizard", "  ", "gengar"]).await.unwrap();

    let slots: Vec<usize> = analysis.members.iter().map(|m| m.slot).collect();
    assert_eq!(slots, vec![1, 3]);
    assert!(analysis.errors.is_empty());
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_all_blank_slots_is_an_empty_team() {
    let source = kanto_source();
    let err = analyse_team(&source, &["", " "]).await.unwrap_err();
    assert_eq!(err, DexError::Validation(ValidationError::EmptyTeam { max: 6 }));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_types_from_later_generations_are_neutral() {
    let source = kanto_source();
    let analysis = analyse_team(&source, &["clefable"]).await.unwrap();

    let member = &analysis.members[0];
    assert_eq!(member.types, vec!["Fairy"]);
    assert!(member.chart.iter().all(|(_, multiplier)| multiplier == 1.0));
    assert_eq!(member.summary, Default::default());
}

#[tokio::test]
async fn test_numeric_ids_resolve_like_names() {
    let source = kanto_source();
    let analysis = analyse_team(&source, &["6", "94"]).await.unwrap();
    let names: Vec<&str> = analysis.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["charizard", "gengar"]);
}

#[tokio::test]
async fn test_analysis_serialises_with_camel_case_keys() {
    let source = kanto_source();
    let analysis = analyse_team(&source, &["gengar"]).await.unwrap();
    let json = serde_json::to_value(&analysis).unwrap();

    assert_eq!(json["members"][0]["chart"]["Normal"], 0.0);
    assert_eq!(json["teamVulnerabilities"]["Psychic"]["weakCount"], 1);
    assert_eq!(json["coverageGaps"], serde_json::json!([]));
}

#[tokio::test]
async fn test_lookups_run_concurrently_and_all_finish_before_tallying() {
    let source = kanto_source()
        .with_default_delay(Duration::from_millis(20))
        .with_delay("dragonite", Duration::from_millis(200));
    let team = ["pidgey", "dragonite", "missingno", "tangela", "dratini", "diglett"];

    let analysis = analyse_team(&source, &team).await.unwrap();

    // Every slot, failing or slow, was pending at the same time.
    assert_eq!(source.peak_in_flight(), team.len());

    let dragonite = analysis.members.iter().find(|m| m.name == "dragonite").unwrap();
    assert_eq!(dragonite.slot, 2);
    assert_eq!(dragonite.summary.quad_weak, vec![PokemonType::Ice]);
    assert_eq!(analysis.team_vulnerabilities[&PokemonType::Ice].weak_count, 5);

    let slots: Vec<usize> = analysis.errors.iter().map(|e| e.slot).collect();
    assert_eq!(slots, vec![3]);
    assert_eq!(analysis.members.len(), 5);
}

#[tokio::test]
async fn test_retyped_members_use_their_generation_three_typing() {
    let source = kanto_source().with_pokemon(
        PokemonRecordBuilder::new(35, "clefairy")
            .with_types(&["fairy"])
            .with_past_types("generation-v", &["normal"])
            .build(),
    );
    let analysis = analyse_team(&source, &["clefairy"]).await.unwrap();

    let member = &analysis.members[0];
    assert_eq!(member.types, vec!["Normal"]);
    assert_eq!(member.summary.immune, vec![PokemonType::Ghost]);
    assert_eq!(analysis.team_vulnerabilities[&PokemonType::Ghost].immune_count, 1);
}
