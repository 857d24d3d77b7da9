use super::{HelpBook, HelpTopic, Section};

pub(crate) fn book() -> HelpBook<'static> {
    HelpBook {
        title: "nn - simple note taking",
        usage: "nn [command]",
        topics: ALL_TOPICS,
        footer: &["Use `nn help <topic>` for details, e.g. `nn help show` or `nn help keys`."],
    }
}

const ALL_TOPICS: &[HelpTopic<'static>] = &[
    HelpTopic {
        name: "browse",
        summary: "Interactive browser (run nn without arguments).",
        usage: "nn",
        details: &[
            "Notebooks are the folders directly under the notes directory; every regular, non-hidden file inside a notebook (at any depth) is a note.",
            "Notes are listed newest first. Listings are cached per notebook and refreshed after you create a note there.",
        ],
        section: Section::Command,
    },
    HelpTopic {
        name: "init",
        summary: "Create a new note environment (not implemented).",
        usage: "nn init",
        details: &[],
        section: Section::Command,
    },
    HelpTopic {
        name: "check",
        summary: "Check that everything is set up properly (not implemented).",
        usage: "nn check",
        details: &[],
        section: Section::Command,
    },
    HelpTopic {
        name: "new",
        summary: "Create a new note (not implemented; press n in the browser).",
        usage: "nn new",
        details: &[],
        section: Section::Command,
    },
    HelpTopic {
        name: "sync",
        summary: "Sync notes with a git server (not implemented).",
        usage: "nn sync",
        details: &[],
        section: Section::Command,
    },
    HelpTopic {
        name: "show",
        summary: "Show the content of the notes directory.",
        usage: "nn show",
        details: &[
            "Runs `tree` on the notes directory. Fails when `tree` is not installed.",
        ],
        section: Section::Command,
    },
    HelpTopic {
        name: "help",
        summary: "Print this message, or details for one topic.",
        usage: "nn help [topic]",
        details: &[],
        section: Section::Command,
    },
    HelpTopic {
        name: "keys",
        summary: "Keys available in the browser.",
        usage: "j/k h/l enter n q",
        details: &[
            "j / k or arrows: move within the focused list.",
            "l / right: focus the note list. h / left: back to notebooks.",
            "enter: open the selected note in $EDITOR.",
            "n: type a topic for a new note in the selected notebook; enter opens the editor on <notebook>/<YYYY-MM-DD>-<topic>.md, esc cancels.",
            "q / esc: quit.",
        ],
        section: Section::Keys,
    },
    HelpTopic {
        name: "EDITOR",
        summary: "Editor used to open notes (default: vim).",
        usage: "EDITOR",
        details: &["May include arguments, e.g. `code --wait`."],
        section: Section::Environment,
    },
    HelpTopic {
        name: "NNDIR",
        summary: "Notes directory (default: ~/notes).",
        usage: "NNDIR",
        details: &[],
        section: Section::Environment,
    },
    HelpTopic {
        name: "NN_LOG",
        summary: "Write debug logs to this file; NN_LOG_LEVEL picks the level.",
        usage: "NN_LOG",
        details: &["Levels: error, warn, info, debug (default), trace."],
        section: Section::Environment,
    },
    HelpTopic {
        name: "NO_COLOR",
        summary: "Disable colored output.",
        usage: "NO_COLOR",
        details: &[],
        section: Section::Environment,
    },
];
