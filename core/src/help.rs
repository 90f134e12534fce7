//! Help system for CMS commands.

pub fn help_text(topic: Option<&str>) -> String {
    match topic {
        None => overview(),
        Some(t) => {
            if let Some(text) = group_help(t) {
                return text;
            }
            format!("Unknown help topic: '{}'. Run 'cms help' for a list of commands.", t)
        }
    }
}


fn overview() -> String {
    "\
cms — layout templates with inheritance

Usage: cms <command> [args...]

Site commands:
  site create <identifier> [--label <l>] [--hostname <h>]
  site list

Layout commands:
  layout create <site> <identifier> [options]   Create a layout
  layout update <id> [options]                  Change a layout
  layout destroy <id>                           Destroy a layout and its children
  layout show <id>                              Show one layout
  layout list <site>                            List a site's layouts
  layout tokens <id>                            Content tokens merged with parents
  layout options <site> [--exclude <id>] [--parents]
  layout app [<view_path>...]                   Application layouts on disk
  layout revisions <id> [--field <f>]           Content/css/js history
  layout restore <id> <revision>                Restore a revision

Page commands:
  page create <site> <label> [--layout <id>] [--fragment <name>=<value>]...
  page render <id>

Run 'cms help <group>' for details on site, layout, or page."
        .into()
}


fn group_help(group: &str) -> Option<String> {
    let text = match group {
        "site" => "\
Site commands — the scope layouts and pages belong to

  site create <identifier> [--label <l>] [--hostname <h>]
    Create a site. The label defaults to the titleized identifier.

  site list
    List all sites as JSON.",

        "layout" => "\
Layout commands — templates organised as a tree per site

  layout create <site> <identifier> [--label <l>] [--parent <id>] [--position <n>]
                [--content <text> | --content-file <path>]
                [--css <text> | --css-file <path>] [--js <text> | --js-file <path>]
    Create a layout. Without --position it is placed after its siblings.

  layout update <id> [--label <l>] [--identifier <i>] [--parent <id|none>]
                [--position <n>] [--content ...] [--css ...] [--js ...]
    Change a layout. Changed content/css/js are kept as revisions.
    Pages using the layout or any child layout are re-rendered on next view.

  layout destroy <id>
    Destroy the layout and all of its children. Pages lose their layout.

  layout tokens <id>
    Print the tokenized content, merged into the parent's
    {{cms:<fragment> content}} tag.

  layout options <site> [--exclude <id>] [--parents]
    Indented tree of layouts. --parents drops the excluded layout's
    whole subtree.

  layout app [<view_path>...]
    List <view_path>/layouts/**/*.html.* templates (configured
    view_paths when none are given).",

        "page" => "\
Page commands — pages render through a layout

  page create <site> <label> [--layout <id>] [--fragment <name>=<value>]...
    Create a page. Fragments fill the layout's fragment tags.

  page render <id>
    Print the rendered page, from cache when available.",

        _ => return None,
    };
    Some(text.into())
}
