use anyhow::Result;
use tracing::info;

use crate::age::compute_age;
use crate::cmd::PersonArgs;
use crate::report::budget_view;

pub fn budget(person: &PersonArgs) -> Result<()> {
    let (birth, now, profile) = person.resolve()?;
    let age = compute_age(birth, now);
    info!(%birth, %now, age, "computed age");

    print!("{}", budget_view(&profile, age));
    Ok(())
}
