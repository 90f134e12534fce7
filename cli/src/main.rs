//! CMS CLI — the command-line entry point for managing layouts.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use cms_core::command::Command;
use cms_core::data::memory::MemoryStore;
use cms_core::response::Response;
use cms_core::sys::Sys;
use cms_core::types::config::CmsSettings;


fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = args[1..].iter().map(|s| s.as_str()).collect();

    let cmd = match parse_args(&arg_refs) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("cms: {}", e);
            process::exit(1);
        }
    };

    match run(cmd) {
        Ok(Response::Ok { output }) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Ok(Response::Error { message }) => {
            eprintln!("cms error: {}", message);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("cms error: {:#}", e);
            process::exit(1);
        }
    }
}


/// Load settings and the store, execute, and save the store if it changed.
fn run(cmd: Command) -> anyhow::Result<Response> {
    let config_dir = resolve_config_dir();
    let settings_path = config_dir.join("settings.yaml");
    let settings = CmsSettings::from_yaml_file(&settings_path)
        .with_context(|| format!("reading {}", settings_path.display()))?;
    let data_file = settings.data_file_in(&config_dir);
    let store = MemoryStore::load(&data_file)
        .with_context(|| format!("loading {}", data_file.display()))?;
    log::debug!("using store {}", data_file.display());

    let mut sys = Sys::new(store, settings);
    let response = sys.execute(cmd);

    if sys.is_dirty() {
        sys.store()
            .save(&data_file)
            .with_context(|| format!("saving {}", data_file.display()))?;
    }
    Ok(response)
}


fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CMS_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("cms");
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home).join(".config").join("cms")
}


fn parse_args(args: &[&str]) -> Result<Command, String> {
    if args.is_empty() {
        return Err("No command specified. Run 'cms help' for usage.".into());
    }

    match args[0] {
        "help" => Ok(Command::Help {
            topic: args.get(1).map(|s| s.to_string()),
        }),
        "site" => parse_site(args),
        "layout" => parse_layout(args),
        "page" => parse_page(args),
        _ => Err(format!("Unknown command: '{}'. Run 'cms help' for usage.", args[0])),
    }
}


fn parse_site(args: &[&str]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("Usage: cms site <create|list> ...".into());
    }
    match args[1] {
        "create" => {
            if args.len() < 3 {
                return Err("Usage: cms site create <identifier> [--label <l>] [--hostname <h>]".into());
            }
            Ok(Command::SiteCreate {
                identifier: args[2].into(),
                label: find_flag(args, "--label"),
                hostname: find_flag(args, "--hostname"),
            })
        }
        "list" => Ok(Command::SiteList),
        _ => Err(format!("Unknown site subcommand: '{}'", args[1])),
    }
}


fn parse_layout(args: &[&str]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("Usage: cms layout <subcommand> ...".into());
    }
    match args[1] {
        "create" => {
            if args.len() < 4 {
                return Err("Usage: cms layout create <site> <identifier> [options]".into());
            }
            Ok(Command::LayoutCreate {
                site: parse_id(args[2], "site")?,
                identifier: args[3].into(),
                label: find_flag(args, "--label"),
                parent: find_flag(args, "--parent")
                    .map(|p| parse_id(&p, "parent"))
                    .transpose()?,
                position: parse_position(args)?,
                content: text_or_file(args, "--content")?,
                css: text_or_file(args, "--css")?,
                js: text_or_file(args, "--js")?,
            })
        }
        "update" => {
            if args.len() < 3 {
                return Err("Usage: cms layout update <id> [options]".into());
            }
            Ok(Command::LayoutUpdate {
                id: parse_id(args[2], "layout")?,
                label: find_flag(args, "--label"),
                identifier: find_flag(args, "--identifier"),
                parent: find_flag(args, "--parent"),
                position: parse_position(args)?,
                content: text_or_file(args, "--content")?,
                css: text_or_file(args, "--css")?,
                js: text_or_file(args, "--js")?,
            })
        }
        "destroy" => Ok(Command::LayoutDestroy {
            id: required_id(args, "cms layout destroy <id>")?,
        }),
        "show" => Ok(Command::LayoutShow {
            id: required_id(args, "cms layout show <id>")?,
        }),
        "list" => Ok(Command::LayoutList {
            site: required_id(args, "cms layout list <site>")?,
        }),
        "tokens" => Ok(Command::LayoutTokens {
            id: required_id(args, "cms layout tokens <id>")?,
        }),
        "options" => Ok(Command::LayoutOptions {
            site: required_id(args, "cms layout options <site> [--exclude <id>] [--parents]")?,
            exclude: find_flag(args, "--exclude")
                .map(|e| parse_id(&e, "exclude"))
                .transpose()?,
            parents: args.contains(&"--parents"),
        }),
        "app" => Ok(Command::LayoutApp {
            paths: args[2..].iter().map(|s| s.to_string()).collect(),
        }),
        "revisions" => Ok(Command::LayoutRevisions {
            id: required_id(args, "cms layout revisions <id> [--field <f>]")?,
            field: find_flag(args, "--field"),
        }),
        "restore" => {
            if args.len() < 4 {
                return Err("Usage: cms layout restore <id> <revision>".into());
            }
            Ok(Command::LayoutRestore {
                id: parse_id(args[2], "layout")?,
                revision: parse_id(args[3], "revision")?,
            })
        }
        _ => Err(format!("Unknown layout subcommand: '{}'", args[1])),
    }
}


fn parse_page(args: &[&str]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("Usage: cms page <create|render> ...".into());
    }
    match args[1] {
        "create" => {
            if args.len() < 4 {
                return Err("Usage: cms page create <site> <label> [--layout <id>] [--fragment <name>=<value>]...".into());
            }
            let mut fragments = BTreeMap::new();
            for raw in find_all_flags(args, "--fragment") {
                let (name, value) = raw
                    .split_once('=')
                    .ok_or_else(|| format!("--fragment expects <name>=<value>, got '{}'", raw))?;
                fragments.insert(name.to_string(), value.to_string());
            }
            Ok(Command::PageCreate {
                site: parse_id(args[2], "site")?,
                label: args[3].into(),
                layout: find_flag(args, "--layout")
                    .map(|l| parse_id(&l, "layout"))
                    .transpose()?,
                fragments,
            })
        }
        "render" => Ok(Command::PageRender {
            id: required_id(args, "cms page render <id>")?,
        }),
        _ => Err(format!("Unknown page subcommand: '{}'", args[1])),
    }
}


fn required_id(args: &[&str], usage: &str) -> Result<u64, String> {
    match args.get(2) {
        Some(raw) => parse_id(raw, "id"),
        None => Err(format!("Usage: {}", usage)),
    }
}


fn parse_id(raw: &str, what: &str) -> Result<u64, String> {
    raw.parse::<u64>()
        .map_err(|_| format!("invalid {} id: '{}'", what, raw))
}


fn parse_position(args: &[&str]) -> Result<Option<i32>, String> {
    find_flag(args, "--position")
        .map(|p| {
            p.parse::<i32>()
                .map_err(|_| format!("invalid position: '{}'", p))
        })
        .transpose()
}


/// `--content <text>` or `--content-file <path>`; the file wins if both are given.
fn text_or_file(args: &[&str], flag: &str) -> Result<Option<String>, String> {
    let file_flag = format!("{}-file", flag);
    if let Some(path) = find_flag(args, &file_flag) {
        return std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| format!("cannot read {}: {}", path, e));
    }
    Ok(find_flag(args, flag))
}


fn find_flag(args: &[&str], flag: &str) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        if *arg == flag {
            return args.get(i + 1).map(|s| s.to_string());
        }
    }
    None
}


fn find_all_flags(args: &[&str], flag: &str) -> Vec<String> {
    args.iter()
        .enumerate()
        .filter(|(_, arg)| **arg == flag)
        .filter_map(|(i, _)| args.get(i + 1).map(|s| s.to_string()))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_layout_create_with_flags() {
        let cmd = parse_args(&[
            "layout", "create", "1", "default", "--parent", "4", "--content", "<p/>",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::LayoutCreate {
                site: 1,
                identifier: "default".into(),
                label: None,
                parent: Some(4),
                position: None,
                content: Some("<p/>".into()),
                css: None,
                js: None,
            }
        );
    }

    #[test]
    fn parse_content_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.html");
        std::fs::write(&path, "<html>{{cms:wysiwyg content}}</html>").unwrap();
        let path_str = path.to_str().unwrap();
        let cmd = parse_args(&["layout", "update", "3", "--content-file", path_str]).unwrap();
        match cmd {
            Command::LayoutUpdate { id, content, .. } => {
                assert_eq!(id, 3);
                assert_eq!(content.as_deref(), Some("<html>{{cms:wysiwyg content}}</html>"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parse_options_flags() {
        let cmd = parse_args(&["layout", "options", "2", "--exclude", "5", "--parents"]).unwrap();
        assert_eq!(
            cmd,
            Command::LayoutOptions {
                site: 2,
                exclude: Some(5),
                parents: true,
            }
        );
    }

    #[test]
    fn parse_page_fragments() {
        let cmd = parse_args(&[
            "page", "create", "1", "Home", "--layout", "2", "--fragment", "title=Hi", "--fragment",
            "content=<p>a=b</p>",
        ])
        .unwrap();
        match cmd {
            Command::PageCreate { fragments, layout, .. } => {
                assert_eq!(layout, Some(2));
                assert_eq!(fragments["title"], "Hi");
                assert_eq!(fragments["content"], "<p>a=b</p>");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parse_errors() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&["bogus"]).is_err());
        assert!(parse_args(&["layout", "show"]).is_err());
        assert!(parse_args(&["layout", "show", "x"]).is_err());
        assert!(parse_args(&["page", "create", "1", "Home", "--fragment", "novalue"]).is_err());
    }
}
