use contentquery::media::{
    columns::files, FilterMode, MediaConfig, MediaProvider, MediaRequest, SortingMode,
    SortingOrder,
};
use contentquery::{ContentUri, MemoryProvider, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== contentquery Media Demo ===\n");

    let config = MediaConfig::new()?;
    let store = MemoryProvider::new();
    store.create_table(
        &config.content_uri,
        [
            files::ID,
            files::DATE_TAKEN,
            files::MIME_TYPE,
            files::SIZE,
            files::ORIENTATION,
            files::WIDTH,
            files::HEIGHT,
            files::DISPLAY_NAME,
            files::PARENT,
            files::BUCKET_DISPLAY_NAME,
            files::MEDIA_TYPE,
        ],
    )?;

    let catalog = MediaProvider::with_config(store.clone(), config.clone());
    catalog.register_media_updates_callback(|uri: &ContentUri| println!("   changed: {}", uri))?;

    let samples = [
        (1, "IMG_0001.jpg", "image/jpeg", 1, 10, "Camera", 2_400_000),
        (2, "VID_0002.mp4", "video/mp4", 3, 10, "Camera", 2_500_000),
        (3, "shot.png", "image/png", 1, 20, "Screenshots", 2_300_000),
    ];
    for (id, name, mime, media_type, folder, bucket, taken) in samples {
        store.insert(
            &config.content_uri,
            [
                Value::from(id),
                Value::from(taken),
                mime.into(),
                Value::from(1024 * id),
                Value::from(0),
                Value::from(4000),
                Value::from(3000),
                name.into(),
                Value::from(folder),
                bucket.into(),
                Value::from(media_type),
            ],
        )?;
    }
    store.notify_change(&"content://media/external/images/media/3".parse()?)?;

    println!("\n1. All media, newest first:");
    for media in catalog.get_local_media(&MediaRequest::default())? {
        println!("   {}", media);
    }

    println!("\n2. Images sorted by name:");
    let request = MediaRequest::default()
        .with_filter(FilterMode::Images)
        .sorted_by(SortingMode::Name, SortingOrder::Ascending);
    for media in catalog.get_local_media(&request)? {
        println!("   {} ({})", media.file_name, media.uri);
    }

    println!("\n3. Folders:");
    for folder in catalog.get_media_folders(FilterMode::All)? {
        println!("   {} [{}] {} item(s)", folder.name, folder.id, folder.media_count);
    }

    catalog.unregister_media_updates_callback()?;
    println!("\n=== Demo Complete ===");
    Ok(())
}
