use crate::cli::commands::DecideArgs;
use crate::cli::render;
use crate::decision::{DecisionEngine, DecisionInput};
use crate::errors::TriageError;

pub fn handle_decide(args: DecideArgs) -> Result<(), TriageError> {
    let input = DecisionInput::from_raw(
        args.exploitation.as_deref(),
        args.exposure.as_deref(),
        args.impact.as_deref(),
    );
    let outcome = DecisionEngine::default().decide(input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", render::render_decision(&outcome));
    }
    Ok(())
}
