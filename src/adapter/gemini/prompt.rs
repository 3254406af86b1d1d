use std::fmt::Write as _;

use crate::domain::CategoryLabel;

const NO_BIO: &str = "No bio provided";

/// Builds the classification prompt for one user.
pub(super) fn build_prompt(bio: &str, casts: &[String]) -> String {
    let bio = match bio.trim() {
        "" => NO_BIO,
        bio => bio,
    };

    let mut prompt = String::from(
        "Place this Farcaster user on the Onchain Alignment Chart using their bio and recent casts.\n\n\
         The x axis runs from Builder (-10) to Speculator (+10). Builders care about shipping \
         infrastructure and lasting products; speculators follow markets, trades and short-term \
         upside. A negative x means Builder, a positive x means Speculator.\n\n\
         The y axis runs from Decentralist (-10) to Pragmatist (+10). Decentralists value \
         censorship resistance, trustlessness and community governance; pragmatists trade some \
         decentralization for usability and adoption. A negative y means Decentralist, a positive \
         y means Pragmatist.\n\n\
         The four categories are:\n",
    );
    for label in CategoryLabel::ALL {
        let _ = writeln!(
            prompt,
            "- {} (x {}, y {}): {}",
            label,
            if label.disposition.required_sign() < 0.0 { "negative" } else { "positive" },
            if label.stance.required_sign() < 0.0 { "negative" } else { "positive" },
            label.blurb()
        );
    }

    prompt.push_str(
        "\nThe coordinates must agree with the category you pick: a Builder-Pragmatist has a \
         negative x and a positive y, and so on.\n\n\
         Scoring: use -9 to -5 or +5 to +9 for a strong lean, -4 to 0 or +1 to +4 for a mild one. \
         Never use exactly -10 or +10. Be decisive when the evidence is clear.\n\n\
         Write to the user in the second person (\"You are...\"), never \"the user\" or \"they\".\n\n",
    );

    let _ = writeln!(prompt, "Bio: {bio}\n");
    prompt.push_str("Recent casts:\n");
    prompt.push_str(&casts.join("\n"));

    prompt.push_str(
        "\n\nOutput rules:\n\
         - alignmentOverview: at most 800 characters, opening with \"You are positioned at (x,y) \
         on the onchain alignment chart\", covering both axes and the overall philosophy.\n\
         - supportingEvidence: four patterns, each named in exactly two words, with one to three \
         short quotes of two or three words taken from the casts and one sentence of explanation.\n\
         - quadrantAnalysis: at most 300 characters on the quadrant, what it means, and how to \
         get along with the other quadrants.\n\
         - category: one of the four options above.\n\
         Keep every field short and grounded in what the casts actually say.",
    );
    prompt
}
