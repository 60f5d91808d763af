pub mod bfs_canvas;
