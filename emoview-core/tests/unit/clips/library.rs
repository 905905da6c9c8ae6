use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_clip_library").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "AnimationClip:\n").unwrap();
}

#[test]
fn scan_collects_anim_files_recursively() {
    let dir = scratch("recursive");
    touch(&dir.join("smile.anim"));
    touch(&dir.join("nested/deeper/wink.ANIM"));
    touch(&dir.join("nested/notes.txt"));
    touch(&dir.join("angry.anim.meta"));

    let lib = ClipLibrary::scan(&dir).unwrap();
    let names: Vec<String> = lib.iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["smile".to_string(), "wink".to_string()]);
    assert_eq!(
        lib.get("wink").unwrap(),
        dir.join("nested/deeper/wink.ANIM").as_path()
    );
}

#[test]
fn duplicate_stems_keep_last_visited_path() {
    let dir = scratch("duplicates");
    touch(&dir.join("a/joy.anim"));
    touch(&dir.join("b/joy.anim"));

    let lib = ClipLibrary::scan(&dir).unwrap();
    assert_eq!(lib.len(), 1);
    assert_eq!(lib.get("joy").unwrap(), dir.join("b/joy.anim").as_path());
}

#[test]
fn scan_rejects_missing_folder() {
    let err = ClipLibrary::scan(Path::new("target/definitely/not/here")).unwrap_err();
    assert!(matches!(err, EmoviewError::Validation(_)));
}

#[test]
fn iteration_is_name_sorted_and_clearable() {
    let mut lib = ClipLibrary::new();
    lib.insert("zeta", "z.anim");
    lib.insert("alpha", "a.anim");
    lib.insert("alpha", "a2.anim");
    let entries: Vec<ClipEntry> = lib.iter().collect();
    assert_eq!(entries[0].name, "alpha");
    assert_eq!(entries[0].path, PathBuf::from("a2.anim"));
    assert_eq!(entries[1].name, "zeta");

    lib.clear();
    assert!(lib.is_empty());
}
