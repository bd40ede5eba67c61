//! Retro icon collection
//!
//! PNG icons stored as `/Icons/<variant folder>/<category folder>/<name>.png`.
//! The registry lists the names that ship with the site.

use std::fmt;

use scorpion_theme::ThemeState;
use serde::{Deserialize, Serialize};

use crate::AssetCatalog;

/// Icon collection folder
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconCategory {
    UserApps,
    SystemApps,
    SystemFolders,
    Extensions,
    Drives,
}

impl IconCategory {
    pub const ALL: [IconCategory; 5] = [
        IconCategory::UserApps,
        IconCategory::SystemApps,
        IconCategory::SystemFolders,
        IconCategory::Extensions,
        IconCategory::Drives,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            IconCategory::UserApps => "user-apps",
            IconCategory::SystemApps => "system-apps",
            IconCategory::SystemFolders => "system-folders",
            IconCategory::Extensions => "extensions",
            IconCategory::Drives => "drives",
        }
    }

    pub fn folder(&self) -> &'static str {
        match self {
            IconCategory::UserApps => "1. User apps",
            IconCategory::SystemApps => "2. System apps",
            IconCategory::SystemFolders => "3. System folders",
            IconCategory::Extensions => "4. Extensions",
            IconCategory::Drives => "5. Drives",
        }
    }

    /// Names shipped in this category
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            IconCategory::UserApps => USER_APPS,
            IconCategory::SystemApps => SYSTEM_APPS,
            IconCategory::SystemFolders => SYSTEM_FOLDERS,
            IconCategory::Extensions => EXTENSIONS,
            IconCategory::Drives => DRIVES,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().contains(&name)
    }
}

impl fmt::Display for IconCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Light or dark artwork
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconVariant {
    #[default]
    Light,
    Dark,
}

impl IconVariant {
    pub fn folder(&self) -> &'static str {
        match self {
            IconVariant::Light => "Light theme",
            IconVariant::Dark => "Dark theme",
        }
    }

    /// Dark artwork only in retro + dark
    pub fn for_theme(theme: &ThemeState) -> Self {
        if theme.dark_mode_active() {
            IconVariant::Dark
        } else {
            IconVariant::Light
        }
    }
}

/// Path of an icon image
pub fn icon_path(name: &str, category: IconCategory, variant: IconVariant) -> String {
    format!(
        "/Icons/{}/{}/{}.png",
        variant.folder(),
        category.folder(),
        name
    )
}

/// First category shipping `name`, in [`IconCategory::ALL`] order
pub fn category_of(name: &str) -> Option<IconCategory> {
    IconCategory::ALL.into_iter().find(|c| c.contains(name))
}

/// Icons of one category in one variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconCatalog {
    pub category: IconCategory,
    pub variant: IconVariant,
}

impl IconCatalog {
    pub fn new(category: IconCategory, variant: IconVariant) -> Self {
        Self { category, variant }
    }

    /// Catalog following the active theme
    pub fn for_theme(category: IconCategory, theme: &ThemeState) -> Self {
        Self::new(category, IconVariant::for_theme(theme))
    }
}

impl AssetCatalog for IconCatalog {
    fn locate(&self, name: &str) -> String {
        icon_path(name, self.category, self.variant)
    }
}

/// Shortcut names for frequently used icons
pub static POPULAR: &[(&str, &str)] = &[
    ("vscode", "Visual Studio Code"),
    ("figma", "Figma"),
    ("github", "Github Desktop"),
    ("terminal", "Terminal"),
    ("chrome", "Google Chrome"),
    ("firefox", "Firefox"),
    ("safari", "Safari"),
    ("slack", "Slack"),
    ("discord", "Discord"),
    ("zoom", "zoom.us"),
    ("photoshop", "Adobe Photoshop 2022"),
    ("illustrator", "Adobe Illustrator 2022"),
    ("finder", "Finder"),
    ("calculator", "Calculator"),
    ("calendar", "Calendar"),
    ("folder", "Folder"),
    ("documents", "Documents"),
    ("downloads", "Downloads"),
    ("pdf", "pdf"),
    ("png", "png"),
    ("zip", "zip"),
    ("external", "External"),
    ("usb", "Flash"),
    ("cloud", "iCloud"),
];

/// Resolve a [`POPULAR`] shortcut to its icon name
pub fn popular(key: &str) -> Option<&'static str> {
    POPULAR.iter().find(|(k, _)| *k == key).map(|(_, name)| *name)
}

pub static USER_APPS: &[&str] = &[
    "1 Password", "Adobe Acrobat", "Adobe After Effects 2022", "Adobe Animate 2022",
    "Adobe Audition 2022", "Adobe Bridge 2022", "Adobe Character Animator 2022",
    "Adobe Creative Cloud 2022", "Adobe Dimension 2022", "Adobe Dreamweaver 2022",
    "Adobe Illustrator 2022", "Adobe InCopy 2022", "Adobe InDesign 2022", "Adobe Lightroom 2022",
    "Adobe Lightroom Classic 2022", "Adobe Media Encoder 2022", "Adobe Photoshop 2022",
    "Adobe Premiere Pro 2022", "Adobe Premiere Rush 2022", "Adobe XD 2022", "Affinity Designer",
    "Affinity Photo", "Airmail", "Asana", "Authy", "Bear", "Blender", "Brave", "Canva",
    "Cinema4d", "Craft", "Discord", "Dos Box", "Dropbox", "Evernote", "Fantastical", "Figma",
    "Final Cut Pro", "Firefox", "Flashpoint", "Flight of the amazon queen", "Framer",
    "GarageBand", "Github Desktop", "GoToMeeting", "Google Chrome", "Google Docs",
    "Google Drive", "Google Sheets", "Google Slides", "IconChamp", "Jira Cloud", "Keynote",
    "LastPass", "Linear", "Logic Pro", "Microsoft Excel", "Microsoft Teams", "Microsoft Word",
    "NordVPN", "Notion", "Numbers", "OneDrive", "OneNote", "Outlook", "Pages", "Pogo",
    "PowerPoint", "Signal", "Sim City", "Sketch", "Skype", "Slack", "Soundcloud", "Spark",
    "Spotify", "Steam", "Sublime text editor", "Telegram", "Things", "Timeular", "TradingView",
    "Transporter", "Trello", "TweetDeck", "Twitch", "VLC media player", "Visual Studio Code",
    "We Transfer", "Whatsapp", "Zeplin", "iA Writer", "iMovie", "iTerm", "zoom.us",
];

pub static SYSTEM_APPS: &[&str] = &[
    "Activity Monitor", "Airport Utility", "App Store", "Audio MIDI Setup", "Automator",
    "Bluetooth File Exchange", "Books", "Boot Camp Assistant", "Calculator", "Calendar", "Chess",
    "ColorSync Utility", "Console", "Contacts", "Dictionary", "Digital Colour Meter",
    "Disk Utility", "Dock", "FaceTime", "Find My", "Finder", "Font Book", "Grapher", "Home",
    "Image Capture", "Installer", "Keychain Access", "Launchpad", "Mail", "Maps", "Messages",
    "Migration Assistant", "Mission Control", "Music", "News", "Notes", "Photo Booth", "Photos",
    "Podcasts", "Preview", "QuickTime Player", "Reminders", "Safari", "Screenshot",
    "Script Editor", "Shortcuts", "Siri", "Stickies", "Stocks", "System Information",
    "System preferences", "TV", "Terminal", "TextEdit", "Time Machine", "Trash empty",
    "Trash full", "Voice Memos", "VoiceOver Utility",
];

pub static SYSTEM_FOLDERS: &[&str] = &[
    "Applications", "Desktop", "Developer", "Documents", "Downloads", "Executable", "Folder",
    "Home", "Library", "Movies", "Music", "Pictures", "Public", "Servers", "System", "Users",
    "Utilities",
];

pub static EXTENSIONS: &[&str] = &[
    "7z", "apk", "appx", "avi", "br", "bundle", "cab", "dmg", "exe", "gif", "gz", "html", "iso",
    "jpg", "mkv", "mp3", "mp4", "pdf", "png", "rar", "savedSearch", "tar", "zip",
];

pub static DRIVES: &[&str] = &[
    "External", "Flash", "Floppy", "Internal", "MiniSD", "Removable", "SD", "Server",
    "TimeMachine", "XD", "iCloud",
];
