/// Commented `settings.conf` written on first run; every value equals the default.
pub const SETTINGS_SKELETON_CONTENT: &str = "# Popstar settings\n\
#\n\
# Format: key = value\n\
# Lines starting with # are comments. Inline comments start with ' #'.\n\
#\n\
#-----------------------------------------------------------------------------------------------------------------------\n\
#\n\
# ---------- Package index ----------\n\
#\n\
# Base URL used to build clone URLs: <aur_base_url>/<package>.git\n\
aur_base_url = https://aur.archlinux.org\n\
# RPC search endpoint (queried as <search_url>/<term>?by=name-desc)\n\
search_url = https://aur.archlinux.org/rpc/v5/search\n\
#\n\
# ---------- Build and install ----------\n\
#\n\
# Directory created under the system temp directory for each clone\n\
scratch_dir_name = popstarTemp\n\
# Pass --noconfirm to makepkg\n\
build_noconfirm = true\n\
# Keep the cloned repository after the build finishes\n\
keep_clone = false\n\
#\n\
# ---------- Removal ----------\n\
#\n\
# Pass --noconfirm to pacman -Rns\n\
remove_noconfirm = false\n\
# Which packages the Remove screen lists: all | foreign (AUR and other non-repo packages)\n\
installed_scope = all\n\
#\n\
# ---------- Privileges ----------\n\
#\n\
# Wrapper for privileged commands: auto | sudo | doas | none\n\
privilege_tool = auto\n\
#\n\
# ---------- Safety ----------\n\
#\n\
# Describe operations instead of running them (same as --dry-run)\n\
dry_run_default = false\n";
