use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::{
    FieldKind, FieldSpec, UIChoice, schema_for, specs_for_kind, specs_for_struct,
};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

/// File fields re-asked until the answer passes: (field, must exist, extensions).
const PATH_FIELDS: [(&str, bool, &[&str]); 3] = [
    ("data_path", false, &["csv"]),
    ("output", false, &["csv"]),
    ("artifact_path", true, &["json"]),
];

struct KindItem<K> {
    kind: K,
    text: String,
}

fn kind_items<K>() -> Vec<KindItem<K>>
where
    K: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator,
{
    K::iter()
        .map(|k| {
            let label = k.get_message().unwrap_or_else(|| k.into());
            let desc = k.get_detailed_message().unwrap_or("");
            let text = if desc.is_empty() {
                label.to_string()
            } else {
                format!("{label}  {DIM_ITALIC}{desc}{RESET}")
            };
            KindItem { kind: k, text }
        })
        .collect()
}

/// Menu of the variants of `C`, then the chosen variant's params.
pub fn prompt_choice<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let items = kind_items::<C::Kind>();
    let texts: Vec<String> = items.iter().map(|i| i.text.clone()).collect();
    let first = texts.first().cloned().unwrap_or_default();

    let answer = driver.ask_select(
        C::prompt_label(),
        C::prompt_help().unwrap_or(""),
        &texts,
        &first,
    )?;
    let selected = items
        .into_iter()
        .find(|i| i.text == answer)
        .with_context(|| format!("unknown choice '{answer}'"))?;
    prompt_params(driver, selected.kind)
}

/// Params of one known variant, prompted field by field.
pub fn prompt_params<C: UIChoice, D: PromptDriver>(driver: &D, kind: C::Kind) -> Result<C> {
    let key: &'static str = kind.into();
    let schema = schema_for::<C>();
    let specs = specs_for_kind(&schema, key)?;

    let defaults = C::default_params(kind);
    let mut params = prompt_fields(driver, &specs, &defaults)?;

    if let Some(extra) = C::subprompts(driver, kind)? {
        params.extend(extra);
    }
    C::from_parts(kind, Value::Object(params))
}

/// Every field of a plain struct, starting from `initial`.
pub fn prompt_struct<T, D>(driver: &D, initial: &T) -> Result<T>
where
    T: Serialize + DeserializeOwned + JsonSchema,
    D: PromptDriver,
{
    let schema = schema_for::<T>();
    let specs = specs_for_struct(&schema)?;
    let defaults = serde_json::to_value(initial)?;
    let params = prompt_fields(driver, &specs, &defaults)?;
    serde_json::from_value(Value::Object(params)).context("invalid form answers")
}

fn prompt_fields<D: PromptDriver>(
    driver: &D,
    specs: &[FieldSpec],
    defaults: &Value,
) -> Result<Map<String, Value>> {
    let mut params = Map::new();
    for s in specs {
        let init = s.default.clone().or_else(|| defaults.get(&s.name).cloned());
        if let Some(val) = prompt_field(driver, s, init)? {
            params.insert(s.name.clone(), val);
        }
    }
    Ok(params)
}

fn prompt_field<D: PromptDriver>(
    driver: &D,
    s: &FieldSpec,
    init: Option<Value>,
) -> Result<Option<Value>> {
    let help = s.description.as_deref().unwrap_or("");

    let is_optional_numeric = !s.required
        && matches!(s.kind, FieldKind::Integer | FieldKind::Number)
        && matches!(init, None | Some(Value::Null));

    if is_optional_numeric {
        let def_txt = match s.kind {
            FieldKind::Integer => init.as_ref().and_then(|v| v.as_u64()).map(|n| n.to_string()),
            FieldKind::Number => init.as_ref().and_then(|v| v.as_f64()).map(|x| x.to_string()),
            _ => None,
        }
        .unwrap_or_default();

        let answer = driver.ask_string(
            &s.title,
            &format!("{help}\n(leave blank for none)"),
            &def_txt,
        )?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        let value = if s.kind == FieldKind::Integer {
            let n: u64 = answer
                .parse()
                .with_context(|| format!("invalid integer for {}", s.title))?;
            Value::from(n)
        } else {
            let x: f64 = answer
                .parse()
                .with_context(|| format!("invalid number for {}", s.title))?;
            Value::from(x)
        };
        return Ok(Some(value));
    }

    let value = match s.kind {
        FieldKind::Boolean => {
            let def = init.and_then(|v| v.as_bool()).unwrap_or(false);
            Value::Bool(driver.ask_bool(&s.title, help, def)?)
        }
        FieldKind::String => {
            let def = init
                .and_then(|v| v.as_str().map(|s| s.to_string()))
                .unwrap_or_default();

            let answered = if !s.options.is_empty() {
                driver.ask_select(&s.title, help, &s.options, &def)?
            } else if let Some(&(_, must_exist, exts)) =
                PATH_FIELDS.iter().find(|(name, _, _)| *name == s.name)
            {
                let pb = prompt_path_until_ok(driver, &s.title, help, &def, must_exist, exts)?;
                pb.to_string_lossy().into_owned()
            } else {
                driver.ask_string(&s.title, help, &def)?
            };

            Value::String(answered)
        }
        FieldKind::Integer => {
            let def = init.and_then(|v| v.as_u64()).unwrap_or(0);
            Value::from(driver.ask_u64(
                &s.title,
                help,
                def,
                s.min.map(|x| x as u64),
                s.max.map(|x| x as u64),
            )?)
        }
        FieldKind::Number => {
            let def = init.and_then(|v| v.as_f64()).unwrap_or(0.0);
            Value::from(driver.ask_f64(&s.title, help, def, s.min, s.max)?)
        }
    };
    Ok(Some(value))
}

fn validate_path_str(input: &str, must_exist: bool, allowed_exts: &[&str]) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);

    if must_exist && !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if p.exists() && !p.is_file() {
        return Err("Expected a file path, not a directory".into());
    }
    if !allowed_exts.is_empty() {
        match p.extension().and_then(|e| e.to_str()) {
            Some(ext) if allowed_exts.iter().any(|e| e.eq_ignore_ascii_case(ext)) => {}
            _ => return Err(format!("Expected a .{} file", allowed_exts.join(" / ."))),
        }
    }
    Ok(())
}

fn prompt_path_until_ok<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    default: &str,
    must_exist: bool,
    allowed_exts: &[&str],
) -> Result<PathBuf> {
    loop {
        let answer = driver.ask_string(title, help, default)?;
        match validate_path_str(&answer, must_exist, allowed_exts) {
            Ok(()) => return Ok(PathBuf::from(answer.trim())),
            Err(msg) => {
                eprintln!("✗ {}", msg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedDriver;
    use crate::ui::types::choices::{QueryForm, SplitChoice, SplitKind, TemporalParams};
    use std::collections::HashMap;

    #[test]
    fn defaults_rebuild_the_initial_form() {
        let driver = ScriptedDriver::default();
        let form: QueryForm = prompt_struct(&driver, &QueryForm::default()).unwrap();
        assert_eq!(form, QueryForm::default());
    }

    #[test]
    fn select_answers_land_in_enum_fields() {
        let driver = ScriptedDriver {
            selects: HashMap::from([("Location Type", "ALLEY"), ("Day of Week", "Friday")]),
            ..ScriptedDriver::default()
        };
        let form: QueryForm = prompt_struct(&driver, &QueryForm::default()).unwrap();
        assert_eq!(form.location_type.as_str(), "ALLEY");
        assert_eq!(form.day_of_week.to_string(), "Friday");
    }

    #[test]
    fn choice_menu_goes_through_the_driver() {
        let split: SplitChoice = prompt_choice(&ScriptedDriver::default()).unwrap();
        assert_eq!(split, SplitChoice::default());
    }

    #[test]
    fn variant_params_use_choice_defaults() {
        let driver = ScriptedDriver::default();
        let split: SplitChoice = prompt_params(&driver, SplitKind::Temporal).unwrap();
        assert_eq!(split, SplitChoice::Temporal(TemporalParams::default()));
    }

    #[test]
    fn blank_optional_numbers_are_omitted() {
        use crate::classifiers::RandomForestParams;
        use crate::ui::types::choices::{ModelChoice, ModelChoiceKind};

        // max_depth is the only optional field of the forest
        let driver = ScriptedDriver::with_strings(&[""]);
        let choice: ModelChoice = prompt_params(&driver, ModelChoiceKind::RandomForest).unwrap();
        assert_eq!(choice, ModelChoice::RandomForest(RandomForestParams::default()));
    }

    #[test]
    fn path_validation() {
        assert!(validate_path_str("", false, &["csv"]).is_err());
        assert!(validate_path_str("data/crimes.csv", false, &["csv"]).is_ok());
        assert!(validate_path_str("data/crimes.txt", false, &["csv"]).is_err());
        assert!(validate_path_str("missing/model.json", true, &["json"]).is_err());
    }
}
