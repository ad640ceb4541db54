//! Known embed targets.
//!
//! GitBook renders `{% embed %}` as a preview card with the remote page's
//! title. Hugo has no such lookup, so the titles are kept here.

use std::collections::HashMap;

const BUILTIN_TITLES: &[(&str, &str)] = &[
    (
        "https://docs.microsoft.com/en-us/windows-server/administration/openssh/openssh_install_firstuse",
        "Get started with OpenSSH",
    ),
    (
        "https://docs.microsoft.com/en-us/windows-server/administration/openssh/openssh_install_firstuse#installing-openssh-with-powershell",
        "Install OpenSSH using Windows Settings",
    ),
    (
        "https://docs.microsoft.com/en-us/windows-server/administration/openssh/openssh_server_configuration#windows-configurations-in-sshd_config",
        "Windows Configurations in sshd_config",
    ),
    (
        "https://docs.microsoft.com/en-us/windows/wsl/install-win10",
        "Install WSL",
    ),
    (
        "https://osxdaily.com/2016/08/16/enable-ssh-mac-command-line/",
        "How to Enable SSH on a Mac from the Command Line",
    ),
    (
        "https://osxdaily.com/2016/08/16/enable-ssh-mac-command-line",
        "How to Enable SSH on a Mac from the Command Line",
    ),
    (
        "https://superuser.com/questions/364304/how-do-i-configure-ssh-on-os-x",
        "How do I configure SSH on OS X?",
    ),
];

/// A video embed block replaced by Hugo's built-in `youtube` shortcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoEmbed {
    pub url: &'static str,
    pub caption: &'static str,
    pub video_id: &'static str,
}

impl VideoEmbed {
    /// The exact GitBook block this embed appears as.
    pub fn block(&self) -> String {
        format!(
            "{{% embed url=\"{}\" %}}\n{}\n{{% endembed %}}",
            self.url, self.caption
        )
    }

    /// The Hugo shortcode replacing the block.
    pub fn shortcode(&self) -> String {
        format!("{{{{< youtube {} >}}}}", self.video_id)
    }
}

pub const VIDEO_EMBEDS: &[VideoEmbed] = &[VideoEmbed {
    url: "https://www.youtube.com/watch?v=H6bRljVjR48",
    caption: "Video Tutorial for the Setup Process",
    video_id: "H6bRljVjR48",
}];

/// Titles of embedded URLs, looked up by exact URL.
#[derive(Debug, Clone)]
pub struct EmbedRegistry {
    titles: HashMap<String, String>,
}

impl Default for EmbedRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EmbedRegistry {
    /// Registry with no known URLs.
    pub fn empty() -> Self {
        Self {
            titles: HashMap::new(),
        }
    }

    /// Registry preloaded with the URLs used across the docs.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for (url, title) in BUILTIN_TITLES {
            registry.insert(*url, *title);
        }
        registry
    }

    /// Add or replace the title for a URL.
    pub fn insert(&mut self, url: impl Into<String>, title: impl Into<String>) {
        self.titles.insert(url.into(), title.into());
    }

    /// Look up the title for a URL.
    pub fn title(&self, url: &str) -> Option<&str> {
        self.titles.get(url).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
