use log::{debug, trace};

use super::{parse, Anchor, Relation, Reset, RuleItem, Setting};
use crate::collation_element::{Elements, MAX_ELEMENTS_PER_MAPPING};
use crate::error::{RuleErrorKind, RuleSyntaxError};
use crate::tailoring::{Tailoring, TailoringBuilder};
use crate::weights::PRIMARY;

/// построить таблицу по правилам поверх корневой
pub fn compile(rules: &str) -> Result<Tailoring, RuleSyntaxError>
{
    compile_with_base(rules, &Tailoring::root())
}

/// построить таблицу по правилам поверх базовой
pub fn compile_with_base(rules: &str, base: &Tailoring) -> Result<Tailoring, RuleSyntaxError>
{
    let set = parse(rules)?;
    let mut builder = TailoringBuilder::from_tailoring(base);
    let mut relations = 0;

    for item in set.items.iter() {
        match item {
            RuleItem::Setting(setting) => apply_setting(&mut builder, *setting),
            RuleItem::Reset(reset) => {
                apply_reset(&mut builder, rules, reset)?;
                relations += reset.relations.len();
            }
        }
    }

    builder.close_over_canonical(false);

    let tailoring = builder.bake(rules.to_owned());

    debug!(
        "compiled {} relations into {} entries, options {:?}",
        relations,
        tailoring.len(),
        tailoring.default_options()
    );

    Ok(tailoring)
}

fn apply_setting(builder: &mut TailoringBuilder, setting: Setting)
{
    let options = builder.options_mut();

    match setting {
        Setting::Strength(strength) => options.strength = strength,
        Setting::Alternate(alternate) => options.alternate = alternate,
        Setting::Backwards => options.french = true,
        Setting::CaseFirst(case_first) => options.case_first = case_first,
        Setting::CaseLevel(flag) => options.case_level = flag,
        Setting::Normalization(flag) => options.normalization = flag,
        Setting::NumericOrdering(flag) => options.numeric = flag,
        Setting::MaxVariable(group) => builder.set_max_variable(group),
    }
}

/// элементы позиции сброса
fn resolve_anchor(
    builder: &TailoringBuilder,
    rules: &str,
    reset: &Reset,
) -> Result<Elements, RuleSyntaxError>
{
    let special = |first: bool, variable: bool| {
        builder
            .special_anchor(first, variable)
            .map(|ce| Elements::from_slice(&[ce]))
            .unwrap_or_default()
    };

    let (elements, name) = match &reset.anchor {
        Anchor::Text(text) => (builder.lookup(text), text.as_str()),
        Anchor::FirstVariable => (special(true, true), "[first variable]"),
        Anchor::LastVariable => (special(false, true), "[last variable]"),
        Anchor::FirstRegular => (special(true, false), "[first regular]"),
        Anchor::LastRegular => (special(false, false), "[last regular]"),
    };

    match elements.is_empty() {
        true => Err(RuleSyntaxError::new(
            rules,
            reset.position,
            RuleErrorKind::UnknownAnchor(name.to_owned()),
        )),
        false => Ok(elements),
    }
}

fn apply_reset(
    builder: &mut TailoringBuilder,
    rules: &str,
    reset: &Reset,
) -> Result<(), RuleSyntaxError>
{
    let mut chain = resolve_anchor(builder, rules, reset)?;
    let mut before = reset.before;

    if let (Some(level), Some(first)) = (before, reset.relations.first()) {
        if first.level.level() != Some(level) {
            return Err(RuleSyntaxError::new(
                rules,
                first.position,
                RuleErrorKind::ResetResolution(format!(
                    "[before {}] requires a relation of the same strength, found {}",
                    level,
                    first.level.operator()
                )),
            ));
        }
    }

    for relation in reset.relations.iter() {
        apply_relation(builder, rules, relation, &mut chain, before.is_some())?;
        before = None;
    }

    Ok(())
}

/// записать цель отношения; цепочка становится элементами цели
fn apply_relation(
    builder: &mut TailoringBuilder,
    rules: &str,
    relation: &Relation,
    chain: &mut Elements,
    before: bool,
) -> Result<(), RuleSyntaxError>
{
    let error = |kind: RuleErrorKind| RuleSyntaxError::new(rules, relation.position, kind);

    builder.release(&relation.target);

    if let Some(level) = relation.level.level() {
        if level == PRIMARY && chain.last().is_some_and(|ce| ce.primary() == 0) {
            return Err(error(RuleErrorKind::ResetResolution(
                "primary relation after a primary ignorable".into(),
            )));
        }

        let uppercase = relation.target.chars().next().is_some_and(char::is_uppercase);
        let ce = builder.allocate(chain, level, before, uppercase).map_err(error)?;

        chain.pop();
        chain.push(ce);
    }

    let mut elements = chain.clone();

    if let Some(extension) = &relation.extension {
        elements.extend(builder.lookup(extension));
    }

    if elements.len() > MAX_ELEMENTS_PER_MAPPING {
        return Err(error(RuleErrorKind::Malformed(format!(
            "{:?} maps to {} collation elements, at most {} are allowed",
            relation.target,
            elements.len(),
            MAX_ELEMENTS_PER_MAPPING
        ))));
    }

    trace!("{} {:?} -> {:?}", relation.level.operator(), relation.target, elements);

    builder.tailor(&relation.target, elements);

    Ok(())
}
