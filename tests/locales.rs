use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use regex::Regex;
use serde_yaml::Value;

fn flatten(prefix: &str, value: &Value, out: &mut BTreeSet<String>) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                let key = key.as_str().expect("locale keys are strings");
                let path = if prefix.is_empty() {
                    key.to_string()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        _ => {
            out.insert(prefix.to_string());
        }
    }
}

fn locale_keys(name: &str) -> BTreeSet<String> {
    let path = format!("locales/{name}.yml");
    let text = fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"));
    let value: Value =
        serde_yaml::from_str(&text).unwrap_or_else(|e| panic!("Failed to parse {path}: {e}"));
    let mut keys = BTreeSet::new();
    flatten("", &value, &mut keys);
    keys
}

fn collect_sources(dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_sources(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(fs::read_to_string(&path).unwrap());
        }
    }
}

#[test]
fn translations_have_the_same_keys() {
    let en = locale_keys("en");
    let zh = locale_keys("zh-CN");
    let missing: Vec<_> = en.difference(&zh).collect();
    let extra: Vec<_> = zh.difference(&en).collect();
    assert!(missing.is_empty(), "zh-CN is missing {missing:?}");
    assert!(extra.is_empty(), "zh-CN has unknown keys {extra:?}");
}

#[test]
fn every_key_used_in_source_exists() {
    let en = locale_keys("en");
    let mut sources = Vec::new();
    collect_sources(Path::new("src"), &mut sources);

    let re = Regex::new(r#"t!\(\s*"([a-z_.]+)""#).unwrap();
    let used: BTreeSet<String> = sources
        .iter()
        .flat_map(|src| re.captures_iter(src).map(|c| c[1].to_string()).collect::<Vec<_>>())
        .collect();
    assert!(!used.is_empty());

    let unknown: Vec<_> = used.difference(&en).collect();
    assert!(unknown.is_empty(), "keys used but not translated: {unknown:?}");
}

#[test]
fn placeholders_match_across_translations() {
    let re = Regex::new(r"%\{(\w+)\}").unwrap();
    let load = |name: &str| -> Value {
        serde_yaml::from_str(&fs::read_to_string(format!("locales/{name}.yml")).unwrap()).unwrap()
    };
    let en = load("en");
    let zh = load("zh-CN");

    for key in locale_keys("en") {
        let lookup = |root: &Value| -> String {
            key.split('.')
                .fold(root, |v, part| &v[part])
                .as_str()
                .unwrap_or_default()
                .to_string()
        };
        let names = |text: &str| -> BTreeSet<String> {
            re.captures_iter(text).map(|c| c[1].to_string()).collect()
        };
        assert_eq!(names(&lookup(&en)), names(&lookup(&zh)), "placeholders differ for {key}");
    }
}
