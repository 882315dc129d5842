use super::RuleSource;

/// Arabic transcripts routinely switch into English, so English fillers are included
pub const RULES: RuleSource = RuleSource {
    fillers: &[
        "امم+", "ام+", "اه", "ايه", "يعني", "كده", "يعني كده", "ايوه", "بمعنى", "كمان", "اللي هو",
        "uh+", "um+", "ah+", "like", "you know", "i mean", "well", "so",
    ],
    connectives: &["و", "ثم", "لكن", "لذلك", "بسبب", "حيث", "بينما"],
    corrections: &[
        ("انا", "أنا"),
        ("انت", "أنت"),
        ("انتي", "أنتِ"),
        ("انتما", "أنتما"),
        ("انتم", "أنتم"),
        ("انتن", "أنتن"),
        ("انتو", "أنتم"),
        ("هوا", "هو"),
        ("هيا", "هي"),
        ("احنا", "نحن"),
        ("ديه", "هذه"),
        ("ده", "هذا"),
        ("فيي", "في"),
        ("علي", "على"),
        ("الي", "إلى"),
        ("او", "أو"),
        ("وا", "و"),
        ("ها", "هذا"),
        ("هاذا", "هذا"),
        ("التى", "التي"),
        ("الذى", "الذي"),
    ],
    coherence: &[
        ("و و", "و"),
        ("و. و", ". و"),
        ("ثم ثم", "ثم"),
        ("لكن لكن", "لكن"),
        ("لذلك لذلك", "لذلك"),
        ("  ", " "),
    ],
    // "ف" attaches to the following word, so those replacements carry no trailing space
    sentence_starters: &[
        ("و انا ", "أما أنا ف"),
        ("و أنا ", "أما أنا ف"),
        ("و انت ", "أما أنت ف"),
        ("و أنت ", "أما أنت ف"),
        ("و هو ", "أما هو ف"),
        ("و هي ", "أما هي ف"),
        ("لذلك انا ", "لذلك أنا "),
        ("لذلك انت ", "لذلك أنت "),
    ],
    professional: &[
        ("عملت", "قمت بـ"),
        ("رحت", "ذهبت"),
        ("جيت", "أتيت"),
        ("شفت", "رأيت"),
        ("عرفت", "علمت"),
        ("فهمت", "تفهمت"),
        ("حبيت", "أحببت"),
        ("قدرت", "تمكنت"),
    ],
};
