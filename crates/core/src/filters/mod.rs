pub mod canny_edge_filter;
