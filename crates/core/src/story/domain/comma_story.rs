//! Built-in reference story: the *Comma Gets a Cure* diagnostic passage.

use super::anchor::AnchorRole::{Body, End, Start};
use super::anchor::{AnchorRole, ReferenceAnchor};
use super::anchor_table::AnchorTable;
use super::reference_sentence::ReferenceSentence;
use super::reference_story::{ReferenceStory, ReferenceStoryError};
use crate::matching::domain::normalizer::Substitution;

pub const COMMA_STORY_NAME: &str = "comma-gets-a-cure";
pub const COMMA_STORY_VERSION: &str = "1";

/// (id, phrase, role, weight, known variants)
type AnchorRow = (&'static str, &'static str, AnchorRole, f64, &'static [&'static str]);

const ANCHORS: &[AnchorRow] = &[
    (
        "story-opening",
        "here's a story for you",
        Start,
        3.0,
        &["here is a story for you", "heres a story for you"],
    ),
    ("sarah-perry", "sarah perry", Start, 2.0, &["sara perry", "sarah parry"]),
    (
        "veterinary-nurse",
        "veterinary nurse",
        Start,
        2.0,
        &["veterinarian nurse", "vet nurse"],
    ),
    ("old-zoo", "old zoo", Start, 1.0, &[]),
    (
        "deserted-district",
        "deserted district",
        Body,
        1.0,
        &["desert district", "dessert district"],
    ),
    (
        "private-practice",
        "superb private practice",
        Body,
        1.0,
        &["super private practice"],
    ),
    ("duke-street-tower", "duke street tower", Body, 2.0, &[]),
    ("bowl-of-porridge", "bowl of porridge", Body, 1.0, &[]),
    ("yellow-dress", "plain yellow dress", Body, 1.0, &[]),
    ("fleece-jacket", "fleece jacket", Body, 1.0, &[]),
    ("woman-with-goose", "woman with a goose", Body, 1.0, &[]),
    ("official-letter", "official letter from the vet", Body, 1.0, &[]),
    ("foot-and-mouth", "foot and mouth disease", Body, 1.0, &[]),
    ("dog-or-goat", "dog or a goat", Body, 1.0, &[]),
    ("sentimental", "sentimental", Body, 1.0, &[]),
    ("itchy-goose", "itchy goose", Body, 1.0, &[]),
    ("strut-around", "strut around", Body, 1.0, &[]),
    ("lunatic", "lunatic", Body, 1.0, &[]),
    ("unsanitary-mess", "unsanitary mess", Body, 1.0, &[]),
    ("mary-harrison", "mary harrison", Body, 1.0, &[]),
    ("comma", "comma", Body, 2.0, &[]),
    ("strong-and-huge", "strong and huge", Body, 1.0, &[]),
    ("force-to-trap", "force to trap", Body, 1.0, &[]),
    (
        "stroking-goose",
        "stroking the goose's",
        Body,
        1.0,
        &["stroking the goose", "stroking the geese"],
    ),
    ("singing-tune", "singing a tune", Body, 1.0, &[]),
    (
        "administered-ether",
        "administered ether",
        Body,
        1.0,
        &["administered either"],
    ),
    (
        "not-futile",
        "efforts were not futile",
        Body,
        1.0,
        &["efforts were not brutal"],
    ),
    ("relaxing-bath", "relaxing bath", Body, 1.0, &[]),
    ("wiped-her-off", "wiped her off", Body, 1.0, &[]),
    ("right-side", "right side", Body, 1.0, &[]),
    ("vets-diagnosis", "vet's diagnosis", Body, 1.0, &["vets diagnosis"]),
    ("effective-treatment", "effective treatment", Body, 1.0, &[]),
    ("measure-out", "measure out", Body, 1.0, &[]),
    ("expensive", "expensive", Body, 1.0, &[]),
    ("five-or-six", "five or six times", Body, 1.0, &[]),
    ("penicillin", "penicillin", Body, 1.0, &["peninsula"]),
    (
        "story-closing",
        "can't imagine paying so much",
        End,
        3.0,
        &["cannot imagine paying so much", "can not imagine paying so much"],
    ),
];

const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("kama", "comma"),
    ("kamma", "comma"),
    ("porage", "porridge"),
    ("porrige", "porridge"),
    ("unsenitary", "unsanitary"),
    ("duck street", "duke street"),
    ("fleas jacket", "fleece jacket"),
];

const SENTENCES: &[(&str, &[&str])] = &[
    ("Well, here's a story for you.", &["here's a story for you", "story for you"]),
    (
        "Sarah Perry was a veterinary nurse who had been working daily at an old zoo in a deserted district of the territory,",
        &["sarah perry", "veterinary nurse", "old zoo", "deserted district"],
    ),
    (
        "so she was very happy to start a new job at a superb private practice in north square near the Duke Street Tower.",
        &["superb private practice", "north square", "duke street tower"],
    ),
    (
        "That area was much nearer for her and more to her liking.",
        &["much nearer for her", "more to her liking"],
    ),
    (
        "Even so, on her first morning, she felt stressed.",
        &["first morning", "felt stressed"],
    ),
    (
        "She ate a bowl of porridge, checked herself in the mirror and washed her face in a hurry.",
        &["bowl of porridge", "checked herself", "washed her face"],
    ),
    (
        "Then she put on a plain yellow dress and a fleece jacket, picked up her kit and headed for work.",
        &["plain yellow dress", "fleece jacket", "picked up her kit"],
    ),
    (
        "When she got there, there was a woman with a goose waiting for her.",
        &["woman with a goose", "waiting for her"],
    ),
    (
        "The woman gave Sarah an official letter from the vet.",
        &["official letter from the vet"],
    ),
    (
        "The letter implied that the animal could be suffering from a rare form of foot and mouth disease, which was surprising, because normally you would only expect to see it in a dog or a goat.",
        &["foot and mouth disease", "dog or a goat"],
    ),
    (
        "Sarah was sentimental, so this made her feel sorry for the beautiful bird.",
        &["sentimental", "feel sorry for the beautiful bird"],
    ),
    (
        "Before long, that itchy goose began to strut around the office like a lunatic, which made an unsanitary mess.",
        &["itchy goose", "strut around", "lunatic", "unsanitary mess"],
    ),
    (
        "The goose's owner, Mary Harrison, kept calling, \"Comma, Comma,\" which Sarah thought was an odd choice for a name.",
        &["mary harrison", "comma comma", "odd choice for a name"],
    ),
    (
        "Comma was strong and huge, so it would take some force to trap her, but Sarah had a different idea.",
        &["strong and huge", "force to trap her", "different idea"],
    ),
    (
        "First she tried gently stroking the goose's lower back with her palm, then singing a tune to her.",
        &["stroking the goose's", "lower back", "singing a tune"],
    ),
    ("Finally, she administered ether.", &["administered ether"]),
    ("Her efforts were not futile.", &["efforts were not futile"]),
    (
        "In no time, the goose began to tire, so Sarah was able to hold onto Comma and give her a relaxing bath.",
        &["goose began to tire", "hold onto comma", "relaxing bath"],
    ),
    (
        "Once Sarah had managed to bathe the goose, she wiped her off with a cloth and laid her on her right side.",
        &["bathe the goose", "wiped her off", "right side"],
    ),
    (
        "Then Sarah confirmed the vet's diagnosis.",
        &["confirmed the vet's diagnosis"],
    ),
    (
        "Almost immediately, she remembered an effective treatment that required her to measure out a lot of medicine.",
        &["effective treatment", "measure out", "lot of medicine"],
    ),
    (
        "Sarah warned that this course of treatment might be expensive\u{2014}either five or six times the cost of penicillin.",
        &["expensive", "five or six times", "cost of penicillin"],
    ),
    ("I can't imagine paying so much.", &["can't imagine paying so much"]),
];

/// The reference story the extractor looks for by default.
pub fn comma_gets_a_cure() -> Result<ReferenceStory, ReferenceStoryError> {
    let anchors = ANCHORS
        .iter()
        .map(|&(id, phrase, role, weight, variants)| {
            ReferenceAnchor::new(id, phrase, role, weight).with_variants(variants.iter().copied())
        })
        .collect();
    let table = AnchorTable::new(COMMA_STORY_VERSION, anchors)?;

    let substitutions: Vec<Substitution> = SUBSTITUTIONS
        .iter()
        .map(|&(from, to)| Substitution::new(from, to))
        .collect();

    let sentences = SENTENCES
        .iter()
        .map(|&(text, cues)| ReferenceSentence::new(text, cues.iter().copied()))
        .collect();

    ReferenceStory::new(COMMA_STORY_NAME, table, &substitutions, sentences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_story_is_valid() {
        let story = comma_gets_a_cure().unwrap();
        assert_eq!(story.name(), COMMA_STORY_NAME);
        assert_eq!(story.anchors().version(), COMMA_STORY_VERSION);
        assert_eq!(story.sentences().len(), 23);
        assert_eq!(story.normalizer().substitution_count(), SUBSTITUTIONS.len());
    }

    #[test]
    fn test_builtin_story_has_both_boundaries() {
        let story = comma_gets_a_cure().unwrap();
        assert!(story.anchors().with_role(Start).count() >= 1);
        assert_eq!(story.anchors().with_role(End).count(), 1);
    }

    #[test]
    fn test_every_anchor_phrase_occurs_in_the_story() {
        let story = comma_gets_a_cure().unwrap();
        let n = story.normalizer();
        let text = format!(" {} ", n.normalize(&story.text()));
        for anchor in story.anchors().anchors() {
            let phrase = format!(" {} ", n.normalize(&anchor.canonical_phrase));
            assert!(text.contains(&phrase), "{} not in story text", anchor.id);
        }
    }

    #[test]
    fn test_every_sentence_cue_occurs_in_its_sentence() {
        let story = comma_gets_a_cure().unwrap();
        let n = story.normalizer();
        for sentence in story.sentences() {
            let text = format!(" {} ", n.normalize(&sentence.text));
            for cue in &sentence.cues {
                let cue = format!(" {} ", n.normalize(cue));
                assert!(text.contains(&cue), "{cue:?} not in {:?}", sentence.text);
            }
        }
    }
}
