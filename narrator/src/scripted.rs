use rand::seq::SliceRandom;

use crate::{Idea, Narrator, Result};
use ventura_types::{CharacterKind, CharacterProfile, Verdict};

/// Offline narrator with canned lines per archetype.
///
/// Used in tests and as the fallback when the HTTP collaborator is
/// unconfigured or failing, so a dead text service degrades flavor,
/// never gameplay.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptedNarrator;

struct Script {
    ideas: &'static [(&'static str, &'static str)],
    win_summaries: &'static [&'static str],
    win_reactions: &'static [&'static str],
    loss_summaries: &'static [&'static str],
    loss_reactions: &'static [&'static str],
}

fn script(kind: CharacterKind) -> &'static Script {
    match kind {
        CharacterKind::Rookie => &ROOKIE,
        CharacterKind::Hipster => &HIPSTER,
        CharacterKind::Veteran => &VETERAN,
        CharacterKind::Evangelist => &EVANGELIST,
        CharacterKind::Recluse => &RECLUSE,
    }
}

static ROOKIE: Script = Script {
    ideas: &[
        (
            "Pet rock subscription box",
            "Everyone online is talking about low-maintenance pets. We ship a rock, a hat for the rock, and a certificate. Month two is a second rock.",
        ),
        (
            "Mukbang meal kits",
            "People watch other people eat. What if they could eat the same thing at the same time? We sync the delivery to the stream.",
        ),
        (
            "Reverse alarm clock",
            "An alarm that rings when it's time to go to bed. My roommate said he'd buy one, and he never buys anything.",
        ),
    ],
    win_summaries: &[
        "Somehow the trend held for one more quarter and the boxes sold out twice.",
        "A celebrity posted about it unprompted. Demand did the rest.",
    ],
    win_reactions: &[
        "See?! I TOLD you it wasn't just a phase!",
        "I already spent my share on the sequel idea. Want to hear it?",
    ],
    loss_summaries: &[
        "The trend died the week the inventory arrived.",
        "Turns out three other teams launched the same thing, all funded better.",
    ],
    loss_reactions: &[
        "Okay but counterpoint: what if we tried again?",
        "My roommate says he's sorry.",
    ],
};

static HIPSTER: Script = Script {
    ideas: &[
        (
            "Single-origin ice cube atelier",
            "Water has terroir. We cut cubes by hand from glacial blocks and pair them with the whiskey menu of partner bars.",
        ),
        (
            "Analog email service",
            "We print your inbox every morning and bike it to your door. Unsubscribing is burning the page. People crave ritual.",
        ),
        (
            "Vinyl-only podcast label",
            "Podcasts, but pressed to vinyl, three months late, in editions of 500. Scarcity is the product.",
        ),
    ],
    win_summaries: &[
        "The concept store became a pilgrimage site and the margins were indefensible in the best way.",
        "A design magazine called it 'post-necessary.' Sales tripled.",
    ],
    win_reactions: &[
        "Naturally. The aesthetic was never in question.",
        "We're opening a second location inside the first location.",
    ],
    loss_summaries: &[
        "The landlord tripled the rent the same month the novelty wore off.",
        "It got popular, which killed it for the only customers it had.",
    ],
    loss_reactions: &[
        "Honestly, failing commercially is sort of the point.",
        "The market wasn't ready. It may never be. That's beautiful.",
    ],
};

static VETERAN: Script = Script {
    ideas: &[
        (
            "Licensed laundromat franchise",
            "Twenty-two machines, one part-timer, utilities negotiated down eight percent. I have run four of these. The spreadsheet is boring and correct.",
        ),
        (
            "Commercial kitchen timeshare",
            "Restaurants close at eleven. Their kitchens don't have to. We rent the dead hours to delivery-only brands with signed minimums.",
        ),
        (
            "Import replacement parts depot",
            "Every facility within forty kilometers waits three weeks for the same valve. We stock the valve.",
        ),
    ],
    win_summaries: &[
        "It performed within two percent of the projection. No surprises, which was the plan.",
        "Steady occupancy from month one; the contract renewals did the rest.",
    ],
    win_reactions: &[
        "As projected. I'll send the quarterly summary.",
        "Good. Now we do it again, slightly larger.",
    ],
    loss_summaries: &[
        "A zoning change nobody saw coming shut the site for good.",
        "The anchor client went under and took the minimums with it.",
    ],
    loss_reactions: &[
        "That one's on the city, not the model. Still, I owe you.",
        "First miss in nine years. I don't intend to repeat it.",
    ],
};

static EVANGELIST: Script = Script {
    ideas: &[
        (
            "Fully autonomous noodle stand",
            "One model writes the menu, one cooks, one apologizes to customers. Humans only restock napkins. The unit economics are from the future.",
        ),
        (
            "AI grief counseling for houseplants",
            "People talk to their plants. Our model talks back, as the plant. Subscription tiers by species. The TAM is every windowsill on earth.",
        ),
        (
            "Predictive fashion oracle",
            "We generate next season's trends before the designers do and sell the forecast back to them. It's arbitrage on taste itself.",
        ),
    ],
    win_summaries: &[
        "Against every reasonable objection, it worked, and the acquirer paid in cash.",
        "The demo went viral and the enterprise deals closed themselves.",
    ],
    win_reactions: &[
        "This is merely phase one. Phase two needs a bigger cluster.",
        "I never doubted the model. The model never doubted me.",
    ],
    loss_summaries: &[
        "The model hallucinated the entire supply chain. The napkins were real, though.",
        "Compute costs ate the runway before the market noticed we existed.",
    ],
    loss_reactions: &[
        "We were early. History will apologize to us.",
        "One fine-tune away. We were ONE fine-tune away.",
    ],
};

static RECLUSE: Script = Script {
    ideas: &[
        (
            "Quiet-hours courier route",
            "I noticed the night shift has nothing to eat after two. It's a small route. Eleven stops. I already walked it, twice, to be sure.",
        ),
        (
            "Library seat reservation widget",
            "Students circle the reading room for twenty minutes looking for a seat. A little sensor, a little map. It's not much. It works.",
        ),
        (
            "Umbrella return network",
            "Shops keep lost umbrellas in a bin. We connect the bins. People mostly just want their own umbrella back.",
        ),
    ],
    win_summaries: &[
        "It quietly reached every campus in the city before anyone wrote about it.",
        "No press, no launch party, just eleven stops becoming two hundred.",
    ],
    win_reactions: &[
        "Oh. That's... more than I expected. Thank you.",
        "I mostly did it so the night shift could eat. The profit is strange.",
    ],
    loss_summaries: &[
        "A bigger competitor copied it in a weekend and gave it away free.",
        "It worked fine. It just never found more than forty users.",
    ],
    loss_reactions: &[
        "Sorry. I should have spoken up about the risks more loudly.",
        "The forty users were very kind about it.",
    ],
};

fn pick<'a>(rng: &mut impl rand::Rng, options: &'a [&'static str]) -> String {
    options.choose(rng).copied().unwrap_or_default().to_string()
}

impl Narrator for ScriptedNarrator {
    async fn pitch(&self, character: &CharacterProfile) -> Result<Idea> {
        let mut rng = rand::thread_rng();
        let script = script(character.kind);
        let (title, description) = script
            .ideas
            .choose(&mut rng)
            .copied()
            .unwrap_or(("Untitled venture", ""));
        Ok(Idea {
            title: title.to_string(),
            description: description.to_string(),
        })
    }

    async fn verdict(
        &self,
        character: &CharacterProfile,
        _idea_title: &str,
        won: bool,
    ) -> Result<Verdict> {
        let mut rng = rand::thread_rng();
        let script = script(character.kind);
        let (summaries, reactions) = if won {
            (script.win_summaries, script.win_reactions)
        } else {
            (script.loss_summaries, script.loss_reactions)
        };
        Ok(Verdict {
            summary: pick(&mut rng, summaries),
            reaction: pick(&mut rng, reactions),
        })
    }
}
