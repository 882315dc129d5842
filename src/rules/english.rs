use super::RuleSource;

pub const RULES: RuleSource = RuleSource {
    fillers: &[
        "uh+", "um+", "ah+", "er+", "hmm+", "like", "you know", "i mean", "well", "so",
        "basically", "kind of like",
    ],
    connectives: &["and", "but", "so", "then", "because", "while", "although"],
    corrections: &[
        ("gonna", "going to"),
        ("wanna", "want to"),
        ("gotta", "have to"),
        ("kinda", "kind of"),
        ("sorta", "sort of"),
        ("dunno", "don't know"),
        ("lemme", "let me"),
        ("gimme", "give me"),
        ("cuz", "because"),
        ("coz", "because"),
        ("u", "you"),
        ("ur", "your"),
        ("ya", "you"),
        ("yeah", "yes"),
        ("yep", "yes"),
        ("nope", "no"),
        ("im", "I'm"),
        ("dont", "don't"),
        ("cant", "can't"),
        ("wont", "won't"),
        ("thats", "that's"),
        ("ain't", "isn't"),
    ],
    coherence: &[
        ("and and", "and"),
        ("but but", "but"),
        ("then then", "then"),
        ("because because", "because"),
        ("  ", " "),
    ],
    sentence_starters: &[
        ("but i ", "however, I "),
        ("but we ", "however, we "),
        ("and i ", "as for me, I "),
        ("and we ", "as for us, we "),
    ],
    professional: &[
        ("got", "obtained"),
        ("get", "obtain"),
        ("fixed", "resolved"),
        ("figured", "determined"),
        ("helped", "assisted"),
        ("talked", "spoke"),
        ("checked", "verified"),
        ("tried", "attempted"),
        ("started", "initiated"),
    ],
};
